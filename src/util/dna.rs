/// 核苷酸化学类别：嘌呤 {A, G}，嘧啶 {C, T}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseClass {
    Purine,
    Pyrimidine,
}

/// 按大小写敏感规则归类单个等位基因符号，未知符号返回 None
#[inline]
pub fn classify(allele: &str) -> Option<BaseClass> {
    match allele {
        "A" | "G" => Some(BaseClass::Purine),
        "C" | "T" => Some(BaseClass::Pyrimidine),
        _ => None,
    }
}

/// 两个等位基因属于同一化学类别时为转换（transition）
#[inline]
pub fn same_class(a: &str, b: &str) -> bool {
    match (classify(a), classify(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}
