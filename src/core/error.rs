// 集計パイプライン全体で使うエラー型定義
// 利用者向けの終端メッセージは元データの言語（ロシア語）で表示する

use std::fmt;
use thiserror::Error;

/// 空入力の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyInputKind {
    /// 行が一つもない
    NoRows,
    /// ヘッダーのみでデータ行がない
    HeaderOnly,
}

impl EmptyInputKind {
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NoRows => "Пустой файл",
            Self::HeaderOnly => "Нет данных",
        }
    }
}

impl fmt::Display for EmptyInputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// 固定ルックアップテーブルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Currency,
    Experience,
    Boolean,
}

impl LookupKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Currency => "currency",
            Self::Experience => "experience",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 集計処理固有のエラー型
#[derive(Error, Debug)]
pub enum VacancyError {
    #[error("{kind}")]
    EmptyInput { kind: EmptyInputKind },

    #[error("未知の値 ({kind}): {value:?}")]
    UnknownEnumValue { kind: LookupKind, value: String },

    #[error("Параметр некорректен: {name}")]
    InvalidField { name: String },

    #[error("Ничего не найдено")]
    NoMatches { field: String, value: String },

    #[error("Формат ввода некорректен: {message}")]
    InvalidQuery { message: String },

    #[error("必須フィールド欠落: {field}")]
    MissingField { field: String },

    #[error("不正な値: {field} = {value:?}")]
    InvalidValue { field: String, value: String },

    #[error("パーティション処理エラー: {partition} - {source}")]
    PartitionWorkerFailure {
        partition: String,
        #[source]
        source: Box<VacancyError>,
    },

    #[error("マージエラー: {key} - {reason}")]
    MergeFailure { key: String, reason: String },

    #[error("ファイル発見エラー: {path} - {source}")]
    FileDiscovery {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("入出力エラー: {path} - {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ストレージエラー: {path} - {source}")]
    Storage {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("CSV読み込みエラー: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("設定エラー: {message}")]
    Configuration { message: String },

    #[error("チャンネルエラー: {message}")]
    Channel { message: String },

    #[error("タスクエラー: {source}")]
    Task {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl VacancyError {
    pub fn empty_input(kind: EmptyInputKind) -> Self {
        Self::EmptyInput { kind }
    }

    pub fn unknown_enum_value(kind: LookupKind, value: impl Into<String>) -> Self {
        Self::UnknownEnumValue {
            kind,
            value: value.into(),
        }
    }

    pub fn invalid_field(name: impl Into<String>) -> Self {
        Self::InvalidField { name: name.into() }
    }

    pub fn no_matches(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::NoMatches {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// ワーカー失敗の作成（元のエラーを保持する）
    pub fn partition_failure(partition: impl Into<String>, source: VacancyError) -> Self {
        Self::PartitionWorkerFailure {
            partition: partition.into(),
            source: Box::new(source),
        }
    }

    pub fn merge_failure(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MergeFailure {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn file_discovery(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::FileDiscovery {
            path: path.into(),
            source,
        }
    }

    pub fn storage(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn channel(message: impl Into<String>) -> Self {
        Self::Channel {
            message: message.into(),
        }
    }

    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::Task { source }
    }

    /// 利用者に通知して正常終了すべき状態かどうか
    ///
    /// 空入力と該当なしは欠陥ではなく、メッセージを表示して終了する。
    pub fn is_terminal_notice(&self) -> bool {
        matches!(self, Self::EmptyInput { .. } | Self::NoMatches { .. })
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyInput { .. } | Self::NoMatches { .. } => ErrorSeverity::Low,
            Self::InvalidField { .. } | Self::InvalidQuery { .. } => ErrorSeverity::Medium,
            Self::MissingField { .. } | Self::InvalidValue { .. } => ErrorSeverity::Medium,
            Self::UnknownEnumValue { .. } | Self::Csv { .. } => ErrorSeverity::High,
            Self::FileDiscovery { .. } | Self::Io { .. } | Self::Storage { .. } => {
                ErrorSeverity::High
            }
            Self::Configuration { .. } => ErrorSeverity::High,
            Self::PartitionWorkerFailure { .. } | Self::Channel { .. } | Self::Task { .. } => {
                ErrorSeverity::High
            }
            Self::MergeFailure { .. } => ErrorSeverity::Critical,
        }
    }

    /// 入力を直せば再実行で回復できるかどうか
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::EmptyInput { .. } | Self::NoMatches { .. } => true,
            Self::InvalidField { .. } | Self::InvalidQuery { .. } => true,
            Self::FileDiscovery { .. } | Self::Io { .. } | Self::Storage { .. } => true,
            Self::Configuration { .. } => true,
            Self::UnknownEnumValue { .. } | Self::MissingField { .. } => false,
            Self::InvalidValue { .. } | Self::Csv { .. } => false,
            Self::PartitionWorkerFailure { source, .. } => source.is_recoverable(),
            Self::MergeFailure { .. } => false,
            Self::Channel { .. } | Self::Task { .. } => false,
        }
    }

    /// エラーコンテキストを取得
    pub fn context(&self) -> ErrorContext {
        match self {
            Self::PartitionWorkerFailure { partition, .. } => ErrorContext::new("partition_worker")
                .with_resource(partition.clone())
                .with_suggestion("パーティションファイルの内容を確認してください"),
            Self::UnknownEnumValue { kind, value } => ErrorContext::new("record_parsing")
                .with_resource(format!("{kind}={value}"))
                .with_suggestion("入力ファイルが破損していないか確認してください"),
            Self::FileDiscovery { path, .. }
            | Self::Io { path, .. }
            | Self::Storage { path, .. } => {
                ErrorContext::new("file_discovery")
                    .with_resource(path.clone())
                    .with_suggestion("ファイルパスとアクセス権限を確認してください")
            }
            Self::InvalidField { name } => ErrorContext::new("query_validation")
                .with_resource(name.clone())
                .with_suggestion("列見出しと同じ名前を指定してください"),
            Self::MergeFailure { key, .. } => {
                ErrorContext::new("merge").with_resource(key.clone())
            }
            _ => ErrorContext::new("unknown"),
        }
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// エラーコンテキスト情報
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// 実行していた操作
    pub operation: String,
    /// 関連するリソース（パーティション名等）
    pub resource: Option<String>,
    /// エラー解決のための提案
    pub suggestion: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            resource: None,
            suggestion: None,
        }
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// 集計処理の結果型
pub type VacancyResult<T> = std::result::Result<T, VacancyError>;

impl From<tokio::task::JoinError> for VacancyError {
    fn from(error: tokio::task::JoinError) -> Self {
        VacancyError::Task { source: error }
    }
}
