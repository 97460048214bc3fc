// 自由テキストセルの正規化

use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

/// セル内の改行を置き換える区切り
pub const LINE_SENTINEL: &str = ";;";

/// 改行を `;;` に置換し、タグを除去し、連続する空白を1つにまとめる
pub fn normalize_cell(raw: &str) -> String {
    let joined = raw.replace("\r\n", "\n").replace('\n', LINE_SENTINEL);
    let stripped = MARKUP_TAG.replace_all(&joined, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 先頭のBOMを取り除く
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}
