// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use capacity_dashboard::domain::UtilizationRecord;
use chrono::NaiveDate;

// ==========================================
// UtilizationRecord 构建器
// ==========================================

pub struct RecordBuilder {
    machine_no: String,
    department: String,
    date: Option<NaiveDate>,
    prep_min: f64,
    trial_run_min: f64,
    setup_min: f64,
    processing_min: f64,
    stop_min: f64,
    stop_other_min: f64,
    repair_min: f64,
    actual_quantity: f64,
    explanation: Option<String>,
}

impl RecordBuilder {
    pub fn new(machine_no: &str) -> Self {
        Self {
            machine_no: machine_no.to_string(),
            department: "生产一部".to_string(),
            date: None,
            prep_min: 0.0,
            trial_run_min: 0.0,
            setup_min: 0.0,
            processing_min: 0.0,
            stop_min: 0.0,
            stop_other_min: 0.0,
            repair_min: 0.0,
            actual_quantity: 1.0,
            explanation: None,
        }
    }

    pub fn department(mut self, department: &str) -> Self {
        self.department = department.to_string();
        self
    }

    pub fn date(mut self, year: i32, month: u32, day: u32) -> Self {
        self.date = NaiveDate::from_ymd_opt(year, month, day);
        self
    }

    pub fn prep(mut self, minutes: f64) -> Self {
        self.prep_min = minutes;
        self
    }

    pub fn trial_run(mut self, minutes: f64) -> Self {
        self.trial_run_min = minutes;
        self
    }

    pub fn setup(mut self, minutes: f64) -> Self {
        self.setup_min = minutes;
        self
    }

    pub fn processing(mut self, minutes: f64) -> Self {
        self.processing_min = minutes;
        self
    }

    pub fn stop(mut self, minutes: f64) -> Self {
        self.stop_min = minutes;
        self
    }

    pub fn stop_other(mut self, minutes: f64) -> Self {
        self.stop_other_min = minutes;
        self
    }

    pub fn repair(mut self, minutes: f64) -> Self {
        self.repair_min = minutes;
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.actual_quantity = quantity;
        self
    }

    pub fn explanation(mut self, text: &str) -> Self {
        self.explanation = Some(text.to_string());
        self
    }

    pub fn build(self) -> UtilizationRecord {
        UtilizationRecord {
            machine_no: self.machine_no,
            department: self.department,
            date: self.date,
            prep_min: self.prep_min,
            trial_run_min: self.trial_run_min,
            setup_min: self.setup_min,
            processing_min: self.processing_min,
            stop_min: self.stop_min,
            stop_other_min: self.stop_other_min,
            repair_min: self.repair_min,
            actual_quantity: self.actual_quantity,
            explanation: self.explanation,
        }
    }
}
