use std::fmt;

use crate::error::{Result, VariantError};
use crate::util::dna;

/// 替换类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substitution {
    Transition,
    Transversion,
}

/// 单个 SNP 记录，构造后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snp {
    chrom: String,
    /// 1-based 基因组坐标
    pos: u64,
    id: String,
    ref_allele: String,
    alt_allele: String,
}

impl Snp {
    pub fn new(
        chrom: impl Into<String>,
        pos: u64,
        id: impl Into<String>,
        ref_allele: impl Into<String>,
        alt_allele: impl Into<String>,
    ) -> Result<Self> {
        let chrom = chrom.into();
        let ref_allele = ref_allele.into();
        let alt_allele = alt_allele.into();
        if ref_allele == alt_allele {
            return Err(VariantError::InvalidVariant { chrom, pos, allele: ref_allele });
        }
        Ok(Self { chrom, pos, id: id.into(), ref_allele, alt_allele })
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn pos(&self) -> u64 {
        self.pos
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn ref_allele(&self) -> &str {
        &self.ref_allele
    }

    pub fn alt_allele(&self) -> &str {
        &self.alt_allele
    }

    /// A/G 或 C/T 互换为转换，其余（含未知符号）均不是
    pub fn is_transition(&self) -> bool {
        dna::same_class(&self.ref_allele, &self.alt_allele)
    }

    pub fn is_transversion(&self) -> bool {
        !self.is_transition()
    }

    pub fn substitution(&self) -> Substitution {
        if self.is_transition() {
            Substitution::Transition
        } else {
            Substitution::Transversion
        }
    }
}

impl fmt::Display for Snp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}>{}", self.chrom, self.pos, self.ref_allele, self.alt_allele)
    }
}
