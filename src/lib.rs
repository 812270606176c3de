//! # snp-density
//!
//! 从简化 VCF 文件统计每条染色体的 SNP 转换 / 颠换数量，并找出密度最高的基因组窗口。
//!
//! 本 crate 提供：
//!
//! - **记录解析**：跳过 `#` 注释行，按空白切分 CHROM / POS / ID / REF / ALT
//! - **分组存储**：按染色体名（保持首次出现顺序）与位置唯一索引 SNP
//! - **突变分类**：嘌呤 A/G 或嘧啶 C/T 之间为转换，其余为颠换
//! - **密度窗口**：从 1 开始的不重叠定长窗口，每 1000 bp 的 SNP 数
//!
//! ## 快速示例
//!
//! ```rust
//! use snp_density::registry::Registry;
//!
//! let registry = Registry::from_lines([
//!     "#CHROM\tPOS\tID\tREF\tALT",
//!     "testChr\t24524\trs15926\tG\tT",
//!     "testChr\t62464\trs61532\tC\tT",
//! ])
//! .unwrap();
//!
//! let chr = registry.get("testChr").unwrap();
//! assert_eq!(chr.count_transitions(), 1);
//! assert_eq!(chr.count_transversions(), 1);
//!
//! let best = chr.max_density_window(100_000);
//! assert_eq!((best.start, best.end), (1, 100_000));
//! ```
//!
//! ## 模块说明
//!
//! - [`io`] — VCF 行解析与输入打开（普通 / gzip / stdin）
//! - [`variant`] — SNP 记录与染色体集合（分类、密度窗口）
//! - [`registry`] — 染色体名到染色体集合的有序映射
//! - [`report`] — 汇总 / 逐窗口报告，TSV 与 JSON 输出
//! - [`util`] — 碱基化学类别

pub mod error;
pub mod io;
pub mod registry;
pub mod report;
pub mod util;
pub mod variant;

pub use error::{Result, VariantError};
