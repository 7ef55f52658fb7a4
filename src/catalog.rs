use include_dir::{include_dir, Dir};
use serde::Deserialize;

use crate::error::{Result, SprintError};

static ASSETS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets");

pub const DEFAULT_HOST: &str = "raw.githubusercontent.com";

/// Where a snippet lives on the raw-content host
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SnippetSource {
    pub label: String,
    #[serde(rename = "repo")]
    pub repository: String,
    pub branch: String,
    pub path: String,
}

impl SnippetSource {
    pub fn raw_url(&self, host: &str) -> String {
        format!(
            "https://{}/{}/{}/{}",
            host, self.repository, self.branch, self.path
        )
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct LanguageEntry {
    pub key: String,
    pub label: String,
    pub files: Vec<SnippetSource>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Catalog {
    pub languages: Vec<LanguageEntry>,
}

impl Catalog {
    /// The catalog compiled into the binary
    pub fn builtin() -> Result<Self> {
        let raw = read_asset("sources.json")?;
        Ok(serde_json::from_str(raw)?)
    }

    pub fn language_index(&self, key: &str) -> Result<usize> {
        self.languages
            .iter()
            .position(|l| {
                l.key.eq_ignore_ascii_case(key) || l.label.eq_ignore_ascii_case(key)
            })
            .ok_or_else(|| SprintError::unknown_language(key))
    }

    /// Validate a (language key, file index) pair coming from the user
    pub fn selection(&self, key: &str, file: usize) -> Result<Selection> {
        let language = self.language_index(key)?;
        let entry = &self.languages[language];
        if file >= entry.files.len() {
            return Err(SprintError::FileOutOfRange {
                language: entry.label.clone(),
                index: file,
                count: entry.files.len(),
            });
        }
        Ok(Selection { language, file })
    }
}

pub(crate) fn read_asset(name: &str) -> Result<&'static str> {
    ASSETS_DIR
        .get_file(name)
        .and_then(|f| f.contents_utf8())
        .ok_or_else(|| SprintError::MissingAsset {
            name: name.to_string(),
        })
}

/// Current position of the language and file pickers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub language: usize,
    pub file: usize,
}

impl Selection {
    pub fn next_language(&mut self, catalog: &Catalog) {
        if catalog.languages.is_empty() {
            return;
        }
        self.language = (self.language + 1) % catalog.languages.len();
        self.file = 0;
    }

    pub fn next_file(&mut self, catalog: &Catalog) {
        let count = self.language(catalog).files.len();
        if count > 0 {
            self.file = (self.file + 1) % count;
        }
    }

    pub fn language<'a>(&self, catalog: &'a Catalog) -> &'a LanguageEntry {
        &catalog.languages[self.language]
    }

    pub fn source<'a>(&self, catalog: &'a Catalog) -> &'a SnippetSource {
        &self.language(catalog).files[self.file]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn builtin_catalog_has_five_languages_with_two_files() {
        let catalog = Catalog::builtin().unwrap();

        let keys: Vec<&str> = catalog.languages.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["javascript", "python", "go", "rust", "java"]);
        assert!(catalog.languages.iter().all(|l| l.files.len() == 2));
    }

    #[test]
    fn raw_url_uses_repo_branch_and_path() {
        let catalog = Catalog::builtin().unwrap();
        let source = &catalog.languages[2].files[0];

        assert_eq!(
            source.raw_url(DEFAULT_HOST),
            "https://raw.githubusercontent.com/golang/go/master/src/net/http/client.go"
        );
        assert_eq!(
            source.raw_url("mirror.local"),
            "https://mirror.local/golang/go/master/src/net/http/client.go"
        );
    }

    #[test]
    fn selection_lookup_is_case_insensitive() {
        let catalog = Catalog::builtin().unwrap();

        let sel = catalog.selection("Rust", 1).unwrap();
        assert_eq!(sel.source(&catalog).label, "Rust Formatter");
        assert_eq!(catalog.selection("JAVA", 0).unwrap().language, 4);
    }

    #[test]
    fn selection_rejects_unknown_language_and_bad_index() {
        let catalog = Catalog::builtin().unwrap();

        assert_matches!(
            catalog.selection("cobol", 0),
            Err(SprintError::UnknownLanguage { .. })
        );
        assert_matches!(
            catalog.selection("go", 2),
            Err(SprintError::FileOutOfRange { index: 2, count: 2, .. })
        );
    }

    #[test]
    fn next_language_wraps_and_resets_file() {
        let catalog = Catalog::builtin().unwrap();
        let mut sel = Selection { language: 4, file: 1 };

        sel.next_language(&catalog);

        assert_eq!(sel, Selection { language: 0, file: 0 });
    }

    #[test]
    fn next_file_cycles_within_language() {
        let catalog = Catalog::builtin().unwrap();
        let mut sel = Selection::default();

        sel.next_file(&catalog);
        assert_eq!(sel.file, 1);
        sel.next_file(&catalog);
        assert_eq!(sel.file, 0);
        assert_eq!(sel.language, 0);
    }

    #[test]
    fn missing_asset_is_an_error() {
        assert_matches!(
            read_asset("nope.json"),
            Err(SprintError::MissingAsset { .. })
        );
    }
}
