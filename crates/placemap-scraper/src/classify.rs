//! Maps raw place categories (e.g. `"카페,디저트"`) onto configured groups.

use placemap_core::CategoryGroups;
use regex::Regex;

/// Category groups compiled into one whole-word matcher per group.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    groups: Vec<(String, Regex)>,
    fallback: String,
}

impl CategoryClassifier {
    /// # Errors
    ///
    /// Returns [`regex::Error`] if a group's keyword alternation exceeds the
    /// regex size limit.
    pub fn new(config: &CategoryGroups) -> Result<Self, regex::Error> {
        let groups = config
            .groups
            .iter()
            .map(|group| {
                let alternation = group
                    .keywords
                    .iter()
                    .map(String::as_str)
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join("|");
                Regex::new(&format!(r"\b(?:{alternation})\b")).map(|re| (group.name.clone(), re))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            groups,
            fallback: config.fallback.clone(),
        })
    }

    /// Every group with a keyword matching `raw` as a whole word, in
    /// configuration order. Falls back to the catch-all group.
    #[must_use]
    pub fn classify(&self, raw: &str) -> Vec<String> {
        let category = raw.trim();
        let matched: Vec<String> = self
            .groups
            .iter()
            .filter(|(_, pattern)| pattern.is_match(category))
            .map(|(name, _)| name.clone())
            .collect();

        if matched.is_empty() {
            vec![self.fallback.clone()]
        } else {
            matched
        }
    }
}

/// One-off classification. Prefer [`CategoryClassifier`] for batches.
///
/// # Errors
///
/// See [`CategoryClassifier::new`].
pub fn classify_category(raw: &str, groups: &CategoryGroups) -> Result<Vec<String>, regex::Error> {
    Ok(CategoryClassifier::new(groups)?.classify(raw))
}

#[cfg(test)]
mod tests {
    use placemap_core::parse_category_groups;

    use super::*;

    fn groups() -> CategoryGroups {
        parse_category_groups(
            r"
groups:
  - name: 카페, 디저트
    keywords: [카페, 디저트, 베이커리]
  - name: 한식
    keywords: [한식, 냉면, 국밥]
  - name: 중식
    keywords: [중식, 마라탕]
  - name: 아시아음식
    keywords: [카레, 베트남]
  - name: 일식
    keywords: [일식, 카레]
",
        )
        .unwrap()
    }

    #[test]
    fn matches_cafe_group() {
        let classifier = CategoryClassifier::new(&groups()).unwrap();
        assert_eq!(classifier.classify("카페,디저트"), vec!["카페, 디저트"]);
    }

    #[test]
    fn reports_every_matching_group_in_file_order() {
        let classifier = CategoryClassifier::new(&groups()).unwrap();
        assert_eq!(classifier.classify(" 카레 "), vec!["아시아음식", "일식"]);
    }

    #[test]
    fn keyword_must_be_a_whole_word() {
        let classifier = CategoryClassifier::new(&groups()).unwrap();
        // "냉면" is inside "평양냉면" without a word boundary.
        assert_eq!(classifier.classify("평양냉면"), vec!["기타"]);
        assert_eq!(classifier.classify("한식>냉면"), vec!["한식"]);
    }

    #[test]
    fn unmatched_category_falls_back() {
        assert_eq!(classify_category("볼링장", &groups()).unwrap(), vec!["기타"]);
    }
}
