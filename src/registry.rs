use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::io::vcf::{self, VcfReader, VcfRecord};
use crate::variant::Chromosome;

/// 染色体名 → 染色体集合，按首次出现顺序保存
#[derive(Debug, Default)]
pub struct Registry {
    chromosomes: Vec<Chromosome>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 逐行读取并构建；任一记录出错即中止
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut registry = Self::new();
        for rec in VcfReader::new(reader) {
            registry.add_record(&rec?)?;
        }
        Ok(registry)
    }

    /// 每个元素是一行，行号即元素序号（1-based）；元素内含换行视为格式错误
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for (i, line) in lines.into_iter().enumerate() {
            if let Some(rec) = vcf::record_from_line(line.as_ref(), i as u64 + 1)? {
                registry.add_record(&rec)?;
            }
        }
        Ok(registry)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_reader(vcf::open_input(path)?)
    }

    /// 将记录路由到同名染色体，首次出现时创建
    pub fn add_record(&mut self, rec: &VcfRecord) -> Result<()> {
        let idx = match self.index.get(&rec.chrom) {
            Some(&i) => i,
            None => {
                debug!("new chromosome '{}' at line {}", rec.chrom, rec.line);
                self.chromosomes.push(Chromosome::new(rec.chrom.as_str()));
                let i = self.chromosomes.len() - 1;
                self.index.insert(rec.chrom.clone(), i);
                i
            }
        };
        self.chromosomes[idx].add(&rec.chrom, rec.pos, &rec.id, &rec.ref_allele, &rec.alt_allele)
    }

    pub fn get(&self, name: &str) -> Option<&Chromosome> {
        self.index.get(name).map(|&i| &self.chromosomes[i])
    }

    /// 按首次出现顺序遍历
    pub fn iter(&self) -> std::slice::Iter<'_, Chromosome> {
        self.chromosomes.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.chromosomes.iter().map(Chromosome::name)
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    pub fn total_snps(&self) -> usize {
        self.chromosomes.iter().map(Chromosome::len).sum()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Chromosome;
    type IntoIter = std::slice::Iter<'a, Chromosome>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VariantError;

    #[test]
    fn builds_in_first_seen_order() {
        let lines = [
            "##fileformat=VCFv4.0",
            "#CHROM POS ID REF ALT",
            "chr2\t100\trs1\tA\tG",
            "chr1\t50\trs2\tC\tA",
            "chr2\t10\trs3\tT\tC",
            "chrM\t3\trs4\tG\tC",
        ];
        let reg = Registry::from_lines(lines).unwrap();
        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["chr2", "chr1", "chrM"]);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.total_snps(), 4);
        let chr2 = reg.get("chr2").unwrap();
        assert_eq!(chr2.len(), 2);
        assert_eq!(chr2.count_transitions(), 2);
        assert!(reg.get("chr3").is_none());
    }

    #[test]
    fn header_only_input_is_empty() {
        let reg = Registry::from_lines(["#only a header"]).unwrap();
        assert!(reg.is_empty());
        assert_eq!(reg.total_snps(), 0);
    }

    #[test]
    fn duplicate_position_aborts() {
        let lines = ["testChr 24524 rs15926 G T", "testChr 24524 rs88664 A C"];
        let err = Registry::from_lines(lines).unwrap_err();
        assert!(matches!(err, VariantError::DuplicatePosition { pos: 24524, .. }));
    }

    #[test]
    fn same_position_on_other_chromosome_is_fine() {
        let lines = ["1 500 a A G", "2 500 b A G"];
        let reg = Registry::from_lines(lines).unwrap();
        assert_eq!(reg.total_snps(), 2);
    }

    #[test]
    fn invalid_variant_aborts() {
        let err = Registry::from_lines(["1 69835 rs53461 A A"]).unwrap_err();
        assert!(matches!(err, VariantError::InvalidVariant { .. }));
    }

    #[test]
    fn malformed_record_aborts() {
        let lines = ["1 10 rs1 A G", "1 20 rs2"];
        let err = Registry::from_lines(lines).unwrap_err();
        assert!(matches!(err, VariantError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn from_lines_reports_item_index() {
        let lines = ["#h", "", "1 10 rs1 A G", "1 20 rs2"];
        let err = Registry::from_lines(lines).unwrap_err();
        assert!(matches!(err, VariantError::MalformedRecord { line: 4, .. }));

        let lines = ["1 10 rs1 A G\n", "1 20 rs2 C T\n1 30 rs3 G A", "1 40 rs4"];
        let err = Registry::from_lines(lines).unwrap_err();
        assert!(matches!(err, VariantError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn from_path_reads_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "#CHROM\tPOS\tID\tREF\tALT").unwrap();
        writeln!(file, "testChr\t24524\trs15926\tG\tT").unwrap();
        writeln!(file, "testChr\t62464\trs61532\tC\tT").unwrap();
        file.flush().unwrap();

        let reg = Registry::from_path(file.path()).unwrap();
        let chr = reg.get("testChr").unwrap();
        assert_eq!(chr.count_transitions(), 1);
        assert_eq!(chr.count_transversions(), 1);
    }
}
