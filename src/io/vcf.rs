use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::{Result, VariantError};

/// 简化 VCF 数据行：CHROM POS ID REF ALT，其余列忽略
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcfRecord {
    pub chrom: String,
    pub pos: u64,
    pub id: String,
    pub ref_allele: String,
    pub alt_allele: String,
    /// 记录所在行号（1-based）
    pub line: u64,
}

pub struct VcfReader<R: BufRead> {
    reader: R,
    buf: String,
    line: u64,
    done: bool,
}

impl<R: BufRead> VcfReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: String::new(), line: 0, done: false }
    }

    /// 已读取的行数
    pub fn lines_read(&self) -> u64 {
        self.line
    }

    pub fn next_record(&mut self) -> Result<Option<VcfRecord>> {
        if self.done {
            return Ok(None);
        }

        loop {
            self.buf.clear();
            let n = self.reader.read_line(&mut self.buf)?;
            if n == 0 {
                self.done = true;
                return Ok(None);
            }
            self.line += 1;

            if let Some(rec) = record_from_line(&self.buf, self.line)? {
                return Ok(Some(rec));
            }
        }
    }
}

impl<R: BufRead> Iterator for VcfReader<R> {
    type Item = Result<VcfRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(Some(rec)) => Some(Ok(rec)),
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// 解析单行文本；`#` 注释行与空行返回 None。
/// 行内不允许出现换行符（行尾的 `\n` / `\r\n` 除外）。
pub fn record_from_line(text: &str, line: u64) -> Result<Option<VcfRecord>> {
    // header / meta lines
    if text.starts_with('#') {
        return Ok(None);
    }
    let text = text.trim_end_matches(['\r', '\n']);
    if text.contains('\n') {
        return Err(VariantError::MalformedRecord {
            line,
            reason: "embedded line break".to_string(),
        });
    }
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_line(text, line).map(Some)
}

fn parse_line(text: &str, line: u64) -> Result<VcfRecord> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() < 5 {
        return Err(VariantError::MalformedRecord {
            line,
            reason: format!("expected at least 5 fields, found {}", fields.len()),
        });
    }
    let pos = fields[1].parse::<u64>().map_err(|_| VariantError::MalformedRecord {
        line,
        reason: format!("POS '{}' is not an unsigned integer", fields[1]),
    })?;

    Ok(VcfRecord {
        chrom: fields[0].to_string(),
        pos,
        id: fields[2].to_string(),
        ref_allele: fields[3].to_string(),
        alt_allele: fields[4].to_string(),
        line,
    })
}

/// 打开输入：`-` 为标准输入，`.gz` 后缀按 gzip 解压，其余按普通文本读取
pub fn open_input(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    if path == Path::new("-") {
        return Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>));
    }
    let file = File::open(path)?;
    let inner: Box<dyn Read> = if path.extension() == Some(OsStr::new("gz")) {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(BufReader::new(inner))
}
