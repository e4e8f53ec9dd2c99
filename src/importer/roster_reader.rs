// ==========================================
// 机加工产能看板系统 - 机台花名册读取器
// ==========================================
// 职责: 从花名册文件读出机台号有序清单
// 约定: 第一列为机台号, 第一行为表头, 保留原始顺序
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

// ==========================================
// RosterReader - 花名册读取器
// ==========================================
pub struct RosterReader;

impl RosterReader {
    pub fn new() -> Self {
        Self
    }

    /// 读取花名册文件 (根据扩展名自动选择解析方式)
    ///
    /// # 返回
    /// - `Ok(Vec<String>)`: 机台号清单, trim 后非空, 保持文件顺序
    /// - `Err(ImportError)`: 文件级失败
    pub fn read<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<String>> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => self.read_csv(path),
            "xlsx" | "xls" => self.read_excel(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }

    fn read_csv(&self, path: &Path) -> ImportResult<Vec<String>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let mut machines = Vec::new();
        for result in reader.records() {
            let record = result?;
            if let Some(first) = record.get(0) {
                let trimmed = first.trim();
                if !trimmed.is_empty() {
                    machines.push(trimmed.to_string());
                }
            }
        }
        Ok(machines)
    }

    fn read_excel(&self, path: &Path) -> ImportResult<Vec<String>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(path)?;
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut machines = Vec::new();
        // 跳过表头行
        for row in range.rows().skip(1) {
            if let Some(cell) = row.first() {
                let value = cell.to_string().trim().to_string();
                if !value.is_empty() {
                    machines.push(value);
                }
            }
        }
        Ok(machines)
    }
}

impl Default for RosterReader {
    fn default() -> Self {
        Self::new()
    }
}
