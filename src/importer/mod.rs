// ==========================================
// 机加工产能看板系统 - 导入层
// ==========================================
// 职责: 外部文件 → 原始行 → 类型化工时记录
// 支持: Excel, CSV
// ==========================================

pub mod error;
pub mod file_parser;
pub mod roster_reader;
pub mod row_normalizer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, UniversalFileParser};
pub use roster_reader::RosterReader;
pub use row_normalizer::RowNormalizer;
