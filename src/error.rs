use std::io;
use thiserror::Error;

/// 变异解析与统计过程中的错误类型
#[derive(Error, Debug)]
pub enum VariantError {
    /// 参考等位基因与替代等位基因相同
    #[error("ref == alt ({allele}) at {chrom}:{pos}")]
    InvalidVariant { chrom: String, pos: u64, allele: String },

    /// 同一染色体同一位置出现两条记录
    #[error("duplicate SNP: {chrom}:{pos}")]
    DuplicatePosition { chrom: String, pos: u64 },

    /// 记录被路由到名称不符的染色体
    #[error("chromosome name mismatch: collection '{expected}', record '{found}'")]
    ChromosomeMismatch { expected: String, found: String },

    /// 数据行字段不足或 POS 非整数
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    /// 对空染色体求最后位置
    #[error("chromosome '{chrom}' has no SNPs")]
    EmptyCollection { chrom: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VariantError>;
