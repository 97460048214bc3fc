// スケジューラ設定と設定ファイル

use crate::core::error::{VacancyError, VacancyResult};
use crate::core::traits::SchedulerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultSchedulerConfig {
    max_workers: usize,
    buffer_size: usize,
    enable_progress: bool,
}

impl DefaultSchedulerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }
}

impl Default for DefaultSchedulerConfig {
    fn default() -> Self {
        Self {
            max_workers: num_cpus::get().max(1),
            buffer_size: 32,
            enable_progress: true,
        }
    }
}

impl SchedulerConfig for DefaultSchedulerConfig {
    fn max_workers(&self) -> usize {
        self.max_workers
    }

    fn channel_buffer_size(&self) -> usize {
        self.buffer_size
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}

/// JSON設定ファイルの内容。CLIフラグが指定されればそちらが優先される
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatsSettings {
    pub job_name: Option<String>,
    pub workers: Option<usize>,
    pub channel_buffer: Option<usize>,
    pub progress: Option<bool>,
}

impl StatsSettings {
    pub fn from_json(text: &str) -> VacancyResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| VacancyError::configuration(format!("設定ファイルの解析に失敗: {e}")))
    }

    pub fn load(path: &Path) -> VacancyResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| VacancyError::io(path.display().to_string(), e))?;
        Self::from_json(&text)
    }

    /// 設定値をスケジューラ設定に反映する（未指定の項目はデフォルトのまま）
    pub fn to_scheduler_config(&self) -> DefaultSchedulerConfig {
        let mut config = DefaultSchedulerConfig::default();
        if let Some(workers) = self.workers {
            config = config.with_max_workers(workers);
        }
        if let Some(buffer) = self.channel_buffer {
            config = config.with_buffer_size(buffer);
        }
        if let Some(progress) = self.progress {
            config = config.with_progress_reporting(progress);
        }
        config
    }
}

/// 設定値の検証
pub fn validate_config<C: SchedulerConfig + ?Sized>(config: &C) -> VacancyResult<()> {
    if config.max_workers() == 0 {
        return Err(VacancyError::configuration(
            "ワーカー数は1以上である必要があります",
        ));
    }
    if config.channel_buffer_size() == 0 {
        return Err(VacancyError::configuration(
            "チャンネルバッファサイズは1以上である必要があります",
        ));
    }
    Ok(())
}
