use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArticleError {
    #[error("unknown article: {0}")]
    UnknownArticle(String),

    #[error("not a base article: {0}")]
    NotBaseArticle(String),

    #[error("unknown grammatical case: {0}")]
    UnknownCase(String),
}

//
// ─── ARTICLES ─────────────────────────────────────────────────────────────────
//

/// Nominative definite article as stored in a stage dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseArticle {
    Der,
    Die,
    Das,
}

impl BaseArticle {
    pub const ALL: [BaseArticle; 3] = [BaseArticle::Der, BaseArticle::Die, BaseArticle::Das];

    #[must_use]
    pub fn as_article(self) -> Article {
        match self {
            BaseArticle::Der => Article::Der,
            BaseArticle::Die => Article::Die,
            BaseArticle::Das => Article::Das,
        }
    }
}

impl FromStr for BaseArticle {
    type Err = ArticleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Article>()? {
            Article::Der => Ok(BaseArticle::Der),
            Article::Die => Ok(BaseArticle::Die),
            Article::Das => Ok(BaseArticle::Das),
            Article::Den | Article::Dem => Err(ArticleError::NotBaseArticle(s.to_owned())),
        }
    }
}

impl fmt::Display for BaseArticle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_article().fmt(f)
    }
}

/// Every surface form a definite article can take in the drilled cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Article {
    Der,
    Die,
    Das,
    Den,
    Dem,
}

impl Article {
    pub const ALL: [Article; 5] = [
        Article::Der,
        Article::Die,
        Article::Das,
        Article::Den,
        Article::Dem,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Article::Der => "der",
            Article::Die => "die",
            Article::Das => "das",
            Article::Den => "den",
            Article::Dem => "dem",
        }
    }
}

impl FromStr for Article {
    type Err = ArticleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "der" => Ok(Article::Der),
            "die" => Ok(Article::Die),
            "das" => Ok(Article::Das),
            "den" => Ok(Article::Den),
            "dem" => Ok(Article::Dem),
            _ => Err(ArticleError::UnknownArticle(s.to_owned())),
        }
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── GRAMMATICAL CASE ─────────────────────────────────────────────────────────
//

/// Grammatical case a question asks the article for.
///
/// Dataset keys use the German names (`Nominativ`, `Akkusativ`, `Dativ`);
/// the English names are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GrammaticalCase {
    #[serde(rename = "Nominativ", alias = "Nominative")]
    Nominative,
    #[serde(rename = "Akkusativ", alias = "Accusative")]
    Accusative,
    #[serde(rename = "Dativ", alias = "Dative")]
    Dative,
}

impl GrammaticalCase {
    pub const ALL: [GrammaticalCase; 3] = [
        GrammaticalCase::Nominative,
        GrammaticalCase::Accusative,
        GrammaticalCase::Dative,
    ];

    /// Inflects a nominative article into this case.
    #[must_use]
    pub fn inflect(self, base: BaseArticle) -> Article {
        use BaseArticle as B;
        use GrammaticalCase as C;
        match (base, self) {
            (B::Der, C::Nominative) => Article::Der,
            (B::Der, C::Accusative) => Article::Den,
            (B::Der, C::Dative) => Article::Dem,
            (B::Die, C::Nominative | C::Accusative) => Article::Die,
            (B::Die, C::Dative) => Article::Der,
            (B::Das, C::Nominative | C::Accusative) => Article::Das,
            (B::Das, C::Dative) => Article::Dem,
        }
    }

    /// Key used for this case in dataset sentence maps.
    #[must_use]
    pub fn dataset_key(self) -> &'static str {
        match self {
            GrammaticalCase::Nominative => "Nominativ",
            GrammaticalCase::Accusative => "Akkusativ",
            GrammaticalCase::Dative => "Dativ",
        }
    }
}

impl FromStr for GrammaticalCase {
    type Err = ArticleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Nominativ" | "Nominative" => Ok(GrammaticalCase::Nominative),
            "Akkusativ" | "Accusative" => Ok(GrammaticalCase::Accusative),
            "Dativ" | "Dative" => Ok(GrammaticalCase::Dative),
            _ => Err(ArticleError::UnknownCase(s.to_owned())),
        }
    }
}

impl fmt::Display for GrammaticalCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dataset_key())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inflection_table_matches_grammar() {
        let expected = [
            (BaseArticle::Der, [Article::Der, Article::Den, Article::Dem]),
            (BaseArticle::Die, [Article::Die, Article::Die, Article::Der]),
            (BaseArticle::Das, [Article::Das, Article::Das, Article::Dem]),
        ];
        for (base, row) in expected {
            for (case, article) in GrammaticalCase::ALL.into_iter().zip(row) {
                assert_eq!(case.inflect(base), article, "{base} / {case}");
            }
        }
    }

    #[test]
    fn spot_checks() {
        assert_eq!(GrammaticalCase::Dative.inflect(BaseArticle::Die), Article::Der);
        assert_eq!(GrammaticalCase::Accusative.inflect(BaseArticle::Das), Article::Das);
    }

    #[test]
    fn base_article_rejects_inflected_forms() {
        assert_eq!("Die".parse::<BaseArticle>().unwrap(), BaseArticle::Die);
        assert!(matches!(
            "den".parse::<BaseArticle>(),
            Err(ArticleError::NotBaseArticle(_))
        ));
        assert!(matches!(
            "le".parse::<Article>(),
            Err(ArticleError::UnknownArticle(_))
        ));
    }

    #[test]
    fn case_parses_german_and_english_names() {
        assert_eq!(
            "Akkusativ".parse::<GrammaticalCase>().unwrap(),
            GrammaticalCase::Accusative
        );
        assert_eq!(
            "Dative".parse::<GrammaticalCase>().unwrap(),
            GrammaticalCase::Dative
        );
        assert!("Genitiv".parse::<GrammaticalCase>().is_err());
    }
}
