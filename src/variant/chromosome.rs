use std::collections::BTreeMap;

use serde::Serialize;

use super::snp::Snp;
use crate::error::{Result, VariantError};

/// 密度窗口：闭区间 [start, end] 内每 1000 bp 的 SNP 数
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityWindow {
    pub density: f64,
    pub start: u64,
    pub end: u64,
    pub snps: usize,
}

/// 一条染色体上的全部 SNP，按位置唯一索引
#[derive(Debug, Clone)]
pub struct Chromosome {
    name: String,
    snps: BTreeMap<u64, Snp>,
}

impl Chromosome {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), snps: BTreeMap::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.snps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snps.is_empty()
    }

    pub fn get(&self, pos: u64) -> Option<&Snp> {
        self.snps.get(&pos)
    }

    /// 按位置升序遍历
    pub fn iter(&self) -> impl Iterator<Item = &Snp> {
        self.snps.values()
    }

    /// 构造并插入一个 SNP。名称不符或位置重复时报错，已有记录保持不变。
    pub fn add(
        &mut self,
        chrom: &str,
        pos: u64,
        id: &str,
        ref_allele: &str,
        alt_allele: &str,
    ) -> Result<()> {
        if chrom != self.name {
            return Err(VariantError::ChromosomeMismatch {
                expected: self.name.clone(),
                found: chrom.to_string(),
            });
        }
        if self.snps.contains_key(&pos) {
            return Err(VariantError::DuplicatePosition { chrom: self.name.clone(), pos });
        }
        let snp = Snp::new(chrom, pos, id, ref_allele, alt_allele)?;
        self.snps.insert(pos, snp);
        Ok(())
    }

    pub fn count_transitions(&self) -> usize {
        self.snps.values().filter(|s| s.is_transition()).count()
    }

    pub fn count_transversions(&self) -> usize {
        self.len() - self.count_transitions()
    }

    /// [low, high] 内的 SNP 数
    pub fn count_in_region(&self, low: u64, high: u64) -> usize {
        if high < low {
            return 0;
        }
        self.snps.range(low..=high).count()
    }

    /// 1000 × count / (high − low + 1)
    pub fn density_in_region(&self, low: u64, high: u64) -> f64 {
        if high < low {
            return 0.0;
        }
        // u64 全范围时 high − low + 1 会溢出
        let size = (high - low) as f64 + 1.0;
        1000.0 * self.count_in_region(low, high) as f64 / size
    }

    pub fn last_position(&self) -> Result<u64> {
        self.last_key()
            .ok_or_else(|| VariantError::EmptyCollection { chrom: self.name.clone() })
    }

    fn last_key(&self) -> Option<u64> {
        self.snps.keys().next_back().copied()
    }

    /// 从 1 开始、步长为 window_size 的不重叠窗口，起点小于最后一个 SNP 位置时继续。
    /// 空染色体或 window_size 为 0 时不产生任何窗口。
    pub fn density_profile(&self, window_size: u64) -> DensityWindows<'_> {
        let last = if window_size == 0 { None } else { self.last_key() };
        DensityWindows { chrom: self, window_size, next_start: Some(1), last }
    }

    /// 密度最高的窗口；并列时保留最靠前的窗口。
    /// 空染色体返回 (0.0, 1, window_size − 1)。
    pub fn max_density_window(&self, window_size: u64) -> DensityWindow {
        let mut best = DensityWindow {
            density: 0.0,
            start: 1,
            end: window_size.saturating_sub(1),
            snps: 0,
        };
        if self.is_empty() {
            return best;
        }
        for w in self.density_profile(window_size) {
            if w.density > best.density {
                best = w;
            }
        }
        best
    }
}

/// [`Chromosome::density_profile`] 返回的窗口迭代器
pub struct DensityWindows<'a> {
    chrom: &'a Chromosome,
    window_size: u64,
    next_start: Option<u64>,
    last: Option<u64>,
}

impl Iterator for DensityWindows<'_> {
    type Item = DensityWindow;

    fn next(&mut self) -> Option<DensityWindow> {
        let last = self.last?;
        let start = self.next_start?;
        if start >= last {
            return None;
        }
        let end = start.saturating_add(self.window_size - 1);
        self.next_start = start.checked_add(self.window_size);
        let snps = self.chrom.count_in_region(start, end);
        Some(DensityWindow {
            density: self.chrom.density_in_region(start, end),
            start,
            end,
            snps,
        })
    }
}
