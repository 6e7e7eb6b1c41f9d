use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "svg"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WagonImage {
    File(PathBuf),
    /// Drawn when no picture exists: the word's first letter, uppercased.
    Placeholder(char),
}

impl WagonImage {
    pub fn placeholder_for(word: &str) -> Self {
        let first = word
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?');
        WagonImage::Placeholder(first)
    }
}

/// Finds the picture for a word under `<root>/words/`, trying the letter
/// folder first and then the shared folder.
#[derive(Debug)]
pub struct ImageResolver {
    root: Option<PathBuf>,
    cache: HashMap<(String, String), WagonImage>,
}

impl ImageResolver {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root,
            cache: HashMap::new(),
        }
    }

    pub fn candidates(root: &Path, letter: &str, word: &str) -> Vec<PathBuf> {
        let words = root.join("words");
        [words.join(letter.to_lowercase()), words]
            .iter()
            .flat_map(|dir| {
                IMAGE_EXTENSIONS
                    .iter()
                    .map(move |ext| dir.join(format!("{word}.{ext}")))
            })
            .collect()
    }

    pub fn resolve(&mut self, letter: &str, word: &str) -> WagonImage {
        let key = (letter.to_string(), word.to_string());
        if let Some(image) = self.cache.get(&key) {
            return image.clone();
        }

        let found = self.root.as_deref().and_then(|root| {
            Self::candidates(root, letter, word)
                .into_iter()
                .find(|path| path.is_file())
        });
        let image = match found {
            Some(path) => WagonImage::File(path),
            None => {
                tracing::debug!(letter, word, "no picture, using placeholder");
                WagonImage::placeholder_for(word)
            }
        };
        self.cache.insert(key, image.clone());
        image
    }

    /// Cached lookup for drawing; unresolved words get the placeholder.
    pub fn get(&self, letter: &str, word: &str) -> WagonImage {
        self.cache
            .get(&(letter.to_string(), word.to_string()))
            .cloned()
            .unwrap_or_else(|| WagonImage::placeholder_for(word))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn candidates_try_letter_folder_first() {
        let root = Path::new("/img");
        let candidates = ImageResolver::candidates(root, "Б", "банан");
        assert_eq!(candidates.len(), 10);
        assert_eq!(candidates[0], root.join("words/б/банан.png"));
        assert_eq!(candidates[4], root.join("words/б/банан.svg"));
        assert_eq!(candidates[5], root.join("words/банан.png"));
    }

    #[test]
    fn resolve_falls_through_to_shared_folder() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("words");
        fs::create_dir_all(words.join("б")).unwrap();
        fs::write(words.join("б").join("бочка.webp"), b"").unwrap();
        fs::write(words.join("банан.jpg"), b"").unwrap();

        let mut resolver = ImageResolver::new(Some(dir.path().to_path_buf()));
        assert_eq!(
            resolver.resolve("б", "бочка"),
            WagonImage::File(words.join("б").join("бочка.webp"))
        );
        assert_eq!(
            resolver.resolve("б", "банан"),
            WagonImage::File(words.join("банан.jpg"))
        );
        assert_eq!(resolver.resolve("б", "булка"), WagonImage::Placeholder('Б'));
        assert_eq!(resolver.get("б", "банан"), WagonImage::File(words.join("банан.jpg")));
    }

    #[test]
    fn missing_root_always_gives_placeholder() {
        let mut resolver = ImageResolver::new(None);
        assert_eq!(resolver.resolve("ш", "шапка"), WagonImage::Placeholder('Ш'));
        assert_eq!(WagonImage::placeholder_for(""), WagonImage::Placeholder('?'));
    }
}
