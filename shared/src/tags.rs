//! 标签文本与列表之间的转换

/// 编辑表单中的分隔符
pub const TAG_SEPARATOR: &str = ", ";

/// 按逗号拆分，去掉首尾空白并丢弃空项，保持原有顺序
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_tags(tags: &[String]) -> String {
    tags.join(TAG_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_drops_empty() {
        assert_eq!(
            parse_tags(" financeiro, ,2024 ,, contratos"),
            vec!["financeiro", "2024", "contratos"]
        );
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn test_join_then_parse_keeps_tags() {
        let tags = vec!["rh".to_string(), "férias".to_string()];
        let text = join_tags(&tags);
        assert_eq!(text, "rh, férias");
        assert_eq!(parse_tags(&text), tags);
    }

    #[test]
    fn test_duplicates_are_kept() {
        assert_eq!(parse_tags("a,a"), vec!["a", "a"]);
    }
}
