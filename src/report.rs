use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::registry::Registry;
use crate::variant::{Chromosome, DensityWindow};

pub const DEFAULT_WINDOW_SIZE: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Tsv,
    Json,
}

/// 报告参数
#[derive(Debug, Clone, Copy)]
pub struct ReportOpt {
    pub window_size: u64,
    /// 固定小数位；None 时输出最短可回读形式
    pub precision: Option<usize>,
    pub format: OutputFormat,
    /// 输出每个窗口而非每条染色体的汇总
    pub profile: bool,
}

impl Default for ReportOpt {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            precision: None,
            format: OutputFormat::Tsv,
            profile: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub chrom: String,
    pub transitions: usize,
    pub transversions: usize,
    #[serde(flatten)]
    pub window: DensityWindow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileRow {
    pub chrom: String,
    #[serde(flatten)]
    pub window: DensityWindow,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub input: String,
    pub window_size: u64,
    pub generated_at: String,
    pub version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub chromosomes: Vec<ReportRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows: Option<Vec<ProfileRow>>,
}

pub fn summarize(chrom: &Chromosome, window_size: u64) -> ReportRow {
    ReportRow {
        chrom: chrom.name().to_string(),
        transitions: chrom.count_transitions(),
        transversions: chrom.count_transversions(),
        window: chrom.max_density_window(window_size),
    }
}

pub fn profile(chrom: &Chromosome, window_size: u64) -> Vec<ProfileRow> {
    chrom
        .density_profile(window_size)
        .map(|window| ProfileRow { chrom: chrom.name().to_string(), window })
        .collect()
}

/// 只读遍历 registry，按染色体首次出现顺序生成报告
pub fn build_report(registry: &Registry, input: &str, opt: &ReportOpt) -> Report {
    let chromosomes = registry.iter().map(|c| summarize(c, opt.window_size)).collect();
    let windows = opt.profile.then(|| {
        registry.iter().flat_map(|c| profile(c, opt.window_size)).collect()
    });
    Report {
        meta: ReportMeta {
            input: input.to_string(),
            window_size: opt.window_size,
            generated_at: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
        },
        chromosomes,
        windows,
    }
}

/// 密度格式：默认最短回读形式且至少一位小数（0.0, 20.0）
pub fn format_density(density: f64, precision: Option<usize>) -> String {
    if let Some(p) = precision {
        return format!("{density:.p$}");
    }
    let s = density.to_string();
    if density.is_finite() && !s.contains('.') {
        format!("{s}.0")
    } else {
        s
    }
}

pub fn write_report<W: Write>(out: &mut W, report: &Report, opt: &ReportOpt) -> Result<()> {
    match opt.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Tsv => match &report.windows {
            Some(windows) if opt.profile => write_profile_tsv(out, windows, opt.precision)?,
            _ => write_summary_tsv(out, &report.chromosomes, opt.precision)?,
        },
    }
    out.flush()?;
    Ok(())
}

fn write_summary_tsv<W: Write>(out: &mut W, rows: &[ReportRow], precision: Option<usize>) -> Result<()> {
    writeln!(out, "chrom\ttransitions\ttransversions\tdensity\tregion")?;
    for r in rows {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}..{}",
            r.chrom,
            r.transitions,
            r.transversions,
            format_density(r.window.density, precision),
            r.window.start,
            r.window.end,
        )?;
    }
    Ok(())
}

fn write_profile_tsv<W: Write>(out: &mut W, rows: &[ProfileRow], precision: Option<usize>) -> Result<()> {
    writeln!(out, "chrom\tstart\tend\tsnps\tdensity")?;
    for r in rows {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            r.chrom,
            r.window.start,
            r.window.end,
            r.window.snps,
            format_density(r.window.density, precision),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::from_lines([
            "#CHROM POS ID REF ALT",
            "testChr\t24524\trs15926\tG\tT",
            "testChr\t62464\trs61532\tC\tT",
            "other\t5\trs1\tA\tG",
            "other\t250\trs2\tA\tC",
        ])
        .unwrap()
    }

    fn render(report: &Report, opt: &ReportOpt) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, report, opt).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn format_density_matches_shortest_float() {
        assert_eq!(format_density(0.0, None), "0.0");
        assert_eq!(format_density(20.0, None), "20.0");
        assert_eq!(format_density(0.02, None), "0.02");
        assert_eq!(format_density(1000.0 * 2.0 / 99_999.0, None), "0.02000020000200002");
        assert_eq!(format_density(0.020000200002, Some(4)), "0.0200");
    }

    #[test]
    fn summary_tsv_layout() {
        let opt = ReportOpt::default();
        let report = build_report(&registry(), "in.vcf", &opt);
        let text = render(&report, &opt);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "chrom\ttransitions\ttransversions\tdensity\tregion");
        assert_eq!(lines[1], "testChr\t1\t1\t0.02\t1..100000");
        assert_eq!(lines[2], "other\t1\t1\t0.02\t1..100000");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn empty_registry_prints_header_only() {
        let opt = ReportOpt::default();
        let report = build_report(&Registry::new(), "-", &opt);
        assert_eq!(render(&report, &opt), "chrom\ttransitions\ttransversions\tdensity\tregion\n");
    }

    #[test]
    fn profile_tsv_lists_every_window() {
        let opt = ReportOpt { window_size: 100, profile: true, ..ReportOpt::default() };
        let report = build_report(&registry(), "in.vcf", &opt);
        let windows = report.windows.as_ref().unwrap();
        // testChr: 625 个窗口，other: 3 个窗口
        assert_eq!(windows.len(), 625 + 3);

        let text = render(&report, &opt);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("chrom\tstart\tend\tsnps\tdensity"));
        assert!(text.contains("other\t1\t100\t1\t10.0\n"));
        assert!(text.contains("other\t201\t300\t1\t10.0\n"));
        assert!(text.contains("testChr\t24501\t24600\t1\t10.0\n"));
    }

    #[test]
    fn json_report_has_meta_and_rows() {
        let opt = ReportOpt { format: OutputFormat::Json, ..ReportOpt::default() };
        let report = build_report(&registry(), "calls.vcf", &opt);
        let value: serde_json::Value = serde_json::from_str(&render(&report, &opt)).unwrap();
        assert_eq!(value["meta"]["input"], "calls.vcf");
        assert_eq!(value["meta"]["window_size"], 100_000);
        assert!(value["meta"]["generated_at"].is_string());
        assert!(value.get("windows").is_none());
        let rows = value["chromosomes"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["chrom"], "testChr");
        assert_eq!(rows[0]["transitions"], 1);
        assert_eq!(rows[0]["start"], 1);
        assert_eq!(rows[0]["end"], 100_000);
        assert_eq!(rows[0]["snps"], 2);
    }
}
