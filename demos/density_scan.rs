//! 演示如何在 library 模式下使用 snp-density 统计 SNP 并扫描密度窗口。
//!
//! 运行方式：
//! ```bash
//! cargo run --example density_scan
//! ```

use snp_density::registry::Registry;
use snp_density::report::format_density;

fn main() -> snp_density::Result<()> {
    // 1. 构建 registry
    let registry = Registry::from_lines([
        "##fileformat=VCFv4.0",
        "#CHROM\tPOS\tID\tREF\tALT",
        "testChr\t24524\trs15926\tG\tT",
        "testChr\t62464\trs61532\tC\tT",
        "chr2\t150\trs1\tA\tG",
        "chr2\t120050\trs2\tC\tT",
        "chr2\t120060\trs3\tA\tC",
    ])?;
    println!("染色体数: {}, SNP 总数: {}", registry.len(), registry.total_snps());

    // 2. 转换 / 颠换
    for chr in &registry {
        println!(
            "{}: transitions={}, transversions={}",
            chr.name(),
            chr.count_transitions(),
            chr.count_transversions()
        );
    }

    // 3. 逐窗口密度
    let chr2 = registry.get("chr2").expect("chr2 present");
    for w in chr2.density_profile(50_000) {
        println!("  {}..{}: {} SNPs, density {}", w.start, w.end, w.snps, format_density(w.density, None));
    }

    // 4. 最高密度窗口
    let best = chr2.max_density_window(50_000);
    println!("最高密度窗口: {}..{} ({})", best.start, best.end, format_density(best.density, None));
    Ok(())
}
