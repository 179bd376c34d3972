/// 服务配置 - 后台库的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DB_PATH | comedor.db | SQLite 数据库路径 |
/// | TEMPLATE_PATH | templates/business_report.xlsx | 运营数据报表模板 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 日志文件目录，未设置时仅输出到终端 |
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 数据库文件路径
    pub db_path: String,
    /// 运营数据报表模板路径 (xlsx)
    pub template_path: String,
    /// 日志级别: trace | debug | info | warn | error
    pub log_level: String,
    /// 日志文件目录
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "comedor.db".into()),
            template_path: std::env::var("TEMPLATE_PATH")
                .unwrap_or_else(|_| "templates/business_report.xlsx".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
