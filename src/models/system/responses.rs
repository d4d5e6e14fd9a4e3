use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct SystemInfoResponse {
    pub system_name: String,  // 系统名称
    pub school_name: String,  // 学校名称
    pub version: String,      // 版本号
    pub environment: String,  // 运行环境
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub uptime_seconds: i64,  // 运行时长
}
