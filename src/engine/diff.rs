use crate::models::diff::{DiffHunk, FileDiff, ParsedDiff};

/// unified diff 文字列をファイル名 → `FileDiff` のマップに変換する。
///
/// 構造だけを見るパーサで、失敗しない。解釈できない行は context 扱いか破棄される。
/// 同じ `+++ b/<path>` が再度現れた場合は新しい `FileDiff` で置き換える
/// (それまでに集計した hunk とカウントは失われる)。
pub fn parse_unified_diff(input: &str) -> ParsedDiff {
    let mut files = ParsedDiff::new();
    // files 内の現在のファイルの位置
    let mut current: Option<usize> = None;

    for line in input.lines() {
        if let Some(path) = line.strip_prefix("+++ b/") {
            let filename = path.trim().to_string();
            let (index, _) = files.insert_full(filename.clone(), FileDiff::new(filename));
            current = Some(index);
            continue;
        }

        // ファイル確定前の行は捨てる
        let Some((_, file)) = current.and_then(|i| files.get_index_mut(i)) else {
            continue;
        };

        if line.starts_with("@@ ")
            && let Some(hunk) = parse_hunk_header(line)
        {
            file.hunks.push(hunk);
            continue;
        }

        // hunk が開いていなければ捨てる
        let Some(hunk) = file.hunks.last_mut() else {
            continue;
        };

        if let Some(added) = line.strip_prefix('+')
            && !added.starts_with("++")
        {
            hunk.added_lines.push(added.to_string());
            file.additions += 1;
        } else if let Some(removed) = line.strip_prefix('-')
            && !removed.starts_with("--")
        {
            hunk.removed_lines.push(removed.to_string());
            file.deletions += 1;
        } else {
            hunk.context_lines.push(line.to_string());
        }
    }

    files
}

/// `"@@ -10,5 +10,8 @@"` や `"@@ -10,5 +10,8 @@ def foo():"` の hunk ヘッダを解析する。
fn parse_hunk_header(line: &str) -> Option<DiffHunk> {
    // 先頭の `"@@ "` を除去
    let rest = line.strip_prefix("@@ ")?;
    // 終端の `" @@"` の位置を探す
    let end = rest.find(" @@")?;
    let range_part = &rest[..end];

    // old/new の範囲に分割: "-10,5 +10,8"
    let mut parts = range_part.split_whitespace();
    let old_part = parts.next()?.strip_prefix('-')?;
    let new_part = parts.next()?.strip_prefix('+')?;

    let (old_start, old_count) = parse_range_spec(old_part)?;
    let (new_start, new_count) = parse_range_spec(new_part)?;

    Some(DiffHunk {
        old_start,
        old_count,
        new_start,
        new_count,
        ..Default::default()
    })
}

/// `"10,5"` / `"10,"` / `"10"` を `(start, count)` に変換する。count 省略時は 1。
fn parse_range_spec(spec: &str) -> Option<(usize, usize)> {
    match spec.split_once(',') {
        Some((start, "")) => Some((start.parse().ok()?, 1)),
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((spec.parse().ok()?, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn parse_simple_diff() {
        let diff = indoc! {"
            diff --git a/src/main.py b/src/main.py
            index abc1234..def5678 100644
            --- a/src/main.py
            +++ b/src/main.py
            @@ -10,5 +10,8 @@ def main():
            +    new_line()
                 existing()
            -    removed()
        "};
        let files = parse_unified_diff(diff);
        assert_eq!(files.len(), 1);
        let file = &files["src/main.py"];
        assert_eq!(file.filename, "src/main.py");
        assert_eq!(file.hunks.len(), 1);
        let hunk = &file.hunks[0];
        assert_eq!(hunk.old_start, 10);
        assert_eq!(hunk.old_count, 5);
        assert_eq!(hunk.new_start, 10);
        assert_eq!(hunk.new_count, 8);
        assert_eq!(hunk.added_lines, vec!["    new_line()"]);
        assert_eq!(hunk.removed_lines, vec!["    removed()"]);
        assert_eq!(hunk.context_lines, vec!["     existing()"]);
        assert_eq!(file.additions, 1);
        assert_eq!(file.deletions, 1);
    }

    #[test]
    fn parse_multi_file_diff_keeps_order() {
        let diff = indoc! {"
            --- a/src/foo.py
            +++ b/src/foo.py
            @@ -1,3 +1,4 @@
            +import bar
            --- a/src/bar.py
            +++ b/src/bar.py
            @@ -5,2 +5,3 @@
            +def new_fn(): pass
            @@ -20,4 +21,6 @@
            +# comment
        "};
        let files = parse_unified_diff(diff);
        let names: Vec<&str> = files.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["src/foo.py", "src/bar.py"]);
        assert_eq!(files["src/foo.py"].hunks.len(), 1);
        assert_eq!(files["src/bar.py"].hunks.len(), 2);
        // `--- a/src/bar.py` は foo.py の hunk に context として残る
        assert_eq!(files["src/foo.py"].hunks[0].context_lines, vec!["--- a/src/bar.py"]);
        assert_eq!(files["src/foo.py"].deletions, 0);
    }

    #[test]
    fn parse_hunk_no_count() {
        let h = parse_hunk_header("@@ -1 +1 @@").unwrap();
        assert_eq!(h.old_start, 1);
        assert_eq!(h.old_count, 1);
        assert_eq!(h.new_start, 1);
        assert_eq!(h.new_count, 1);
    }

    #[test]
    fn parse_hunk_zero_and_empty_count() {
        let h = parse_hunk_header("@@ -0,0 +1, @@").unwrap();
        assert_eq!(h.old_start, 0);
        assert_eq!(h.old_count, 0);
        assert_eq!(h.new_start, 1);
        assert_eq!(h.new_count, 1);
    }

    #[test]
    fn parse_hunk_rejects_garbage() {
        assert!(parse_hunk_header("@@ nonsense @@").is_none());
        assert!(parse_hunk_header("@@ -a,b +c,d @@").is_none());
        assert!(parse_hunk_header("@@ -1,2 +3,4").is_none());
    }

    #[test]
    fn parse_new_file_diff_with_dev_null() {
        let diff = indoc! {"
            diff --git a/src/new.py b/src/new.py
            new file mode 100644
            --- /dev/null
            +++ b/src/new.py
            @@ -0,0 +1,2 @@
            +def new_fn():
            +    return 1
        "};
        let files = parse_unified_diff(diff);
        assert_eq!(files.len(), 1);
        assert_eq!(files["src/new.py"].additions, 2);
        assert_eq!(files["src/new.py"].deletions, 0);
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(parse_unified_diff("").is_empty());
    }

    #[test]
    fn lines_before_any_file_or_hunk_are_dropped() {
        let diff = indoc! {"
            +orphan added
            @@ -1,1 +1,1 @@
            -orphan removed
            +++ b/a.py
            +still no hunk
            @@ -1 +1 @@
            +kept
        "};
        let files = parse_unified_diff(diff);
        let file = &files["a.py"];
        assert_eq!(file.hunks.len(), 1);
        assert_eq!(file.hunks[0].added_lines, vec!["kept"]);
        assert_eq!(file.additions, 1);
    }

    #[test]
    fn duplicate_file_marker_replaces_earlier_entry() {
        let diff = indoc! {"
            +++ b/dup.py
            @@ -1,2 +1,2 @@
            +first
            -gone
            +++ b/other.py
            @@ -1 +1 @@
            +x
            +++ b/dup.py
            @@ -9 +9 @@
            +second
        "};
        let files = parse_unified_diff(diff);
        let names: Vec<&str> = files.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["dup.py", "other.py"]);
        let dup = &files["dup.py"];
        assert_eq!(dup.hunks.len(), 1);
        assert_eq!(dup.hunks[0].added_lines, vec!["second"]);
        assert_eq!(dup.additions, 1);
        assert_eq!(dup.deletions, 0);
    }

    #[test]
    fn counts_match_hunk_line_lists() {
        let diff = indoc! {"
            +++ b/calc.py
            @@ -1,4 +1,5 @@
             def calc(a):
            -    x = a
            +    x = a + 1
            +    y = x
            @@ -20,3 +21,2 @@
            -    old()
            -    older()
            +    new()
        "};
        let files = parse_unified_diff(diff);
        let file = &files["calc.py"];
        let added: usize = file.hunks.iter().map(|h| h.added_lines.len()).sum();
        let removed: usize = file.hunks.iter().map(|h| h.removed_lines.len()).sum();
        assert_eq!(file.additions, added);
        assert_eq!(file.deletions, removed);
        assert_eq!(file.churn(), 6);
    }

    #[test]
    fn parsing_is_idempotent() {
        let diff = "+++ b/x.py\n@@ -1 +1 @@\n-a\n+b\n c\n";
        assert_eq!(parse_unified_diff(diff), parse_unified_diff(diff));
    }
}
