use crate::query::TableQuery;
use crate::storage::local::LocalStorageBackend;
use crate::App;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration struct for table command
pub struct TableOptions {
    pub file: PathBuf,
    pub filter: String,
    pub sort: String,
    pub reverse: String,
    pub range: String,
    pub columns: String,
}

/// Execute table command
pub async fn execute_table(options: TableOptions) -> Result<()> {
    // 入力の検証はファイルを読む前に行う
    let query = TableQuery::parse(
        &options.filter,
        &options.sort,
        &options.reverse,
        &options.range,
        &options.columns,
    )?;

    let app = App::new(Arc::new(LocalStorageBackend::new()));
    let view = app.table(&options.file.to_string_lossy(), &query).await?;

    print!("{}", view.render_plain());
    Ok(())
}
