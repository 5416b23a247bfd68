/// Black-box text classifier producing a display label (genre, region, ...).
pub trait GenreClassifier: Send + Sync {
    /// Return a label for `text`. Never fails; unknown text maps to a default label.
    fn classify(&self, text: &str) -> String;
}

/// Keyword-count classifier: the label whose keywords occur most often wins.
///
/// Ties keep the earlier table entry; zero hits return the default label.
#[derive(Clone, Debug)]
pub struct KeywordGenreClassifier {
    table: Vec<(String, Vec<String>)>,
    default_label: String,
}

impl KeywordGenreClassifier {
    /// Build from `(label, keywords)` rows. Keywords match case-insensitively as substrings.
    pub fn new(table: Vec<(String, Vec<String>)>, default_label: impl Into<String>) -> Self {
        let table = table
            .into_iter()
            .map(|(label, kws)| (label, kws.into_iter().map(|k| k.to_lowercase()).collect()))
            .collect();
        Self {
            table,
            default_label: default_label.into(),
        }
    }
}

impl Default for KeywordGenreClassifier {
    fn default() -> Self {
        let row = |label: &str, kws: &[&str]| {
            (
                label.to_string(),
                kws.iter().map(|k| k.to_string()).collect::<Vec<_>>(),
            )
        };
        Self::new(
            vec![
                row(
                    "ビジネス",
                    &[
                        "investment", "投資", "business", "ビジネス", "fund", "capital", "IPO",
                        "M&A", "startup", "法人", "company",
                    ],
                ),
                row(
                    "不動産",
                    &[
                        "real estate", "不動産", "property", "物件", "housing", "development",
                        "construction",
                    ],
                ),
                row(
                    "ライフスタイル",
                    &[
                        "lifestyle", "移住", "education", "教育", "visa", "ビザ", "living",
                        "school", "health", "生活",
                    ],
                ),
                row(
                    "文化",
                    &[
                        "culture", "文化", "craft", "工芸", "halal", "ハラール", "tradition",
                        "伝統", "art", "museum", "heritage",
                    ],
                ),
                row(
                    "テクノロジー",
                    &[
                        "technology", "テクノロジー", "AI", "tech", "digital", "blockchain",
                        "innovation",
                    ],
                ),
                row(
                    "エンターテイメント",
                    &[
                        "entertainment", "エンタメ", "sport", "スポーツ", "tourism", "観光",
                        "hotel", "event", "festival",
                    ],
                ),
            ],
            "ビジネス",
        )
    }
}

impl GenreClassifier for KeywordGenreClassifier {
    fn classify(&self, text: &str) -> String {
        let text = text.to_lowercase();
        let mut best = &self.default_label;
        let mut best_count = 0usize;
        for (label, keywords) in &self.table {
            let count = keywords.iter().filter(|k| text.contains(k.as_str())).count();
            if count > best_count {
                best_count = count;
                best = label;
            }
        }
        best.clone()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/article/genre.rs"]
mod tests;
