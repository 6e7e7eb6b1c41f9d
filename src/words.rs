use icu_normalizer::ComposingNormalizerBorrowed;
use serde::Deserialize;

const WORDS_UK: &str = include_str!("../assets/words.json");

/// Categories that group words by where the sound sits in the word. A round
/// in one of these draws its distractors from the other two.
pub const POSITION_CATEGORIES: [&str; 3] = ["pochatok", "seredyna", "kinets"];

/// Minimum number of words a category, and its distractor pool, must hold.
pub const MIN_POOL: usize = 4;

#[derive(Clone, Debug, Deserialize)]
pub struct CategoryConfig {
    pub key: String,
    pub label: String,
    pub words: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LetterConfig {
    pub code: String,
    pub name: String,
    pub categories: Vec<CategoryConfig>,
}

impl LetterConfig {
    pub fn category(&self, key: &str) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// Same-letter words from other categories that can pose as wrong wagons
    /// for `key`. Position categories prefer each other; when that pool is too
    /// small every other category is used instead.
    pub fn distractors(&self, key: &str) -> Vec<String> {
        let correct: &[String] = self
            .category(key)
            .map(|c| c.words.as_slice())
            .unwrap_or_default();

        let mut pool: Vec<&String> = if POSITION_CATEGORIES.contains(&key) {
            self.other_categories(key)
                .filter(|c| POSITION_CATEGORIES.contains(&c.key.as_str()))
                .flat_map(|c| c.words.iter())
                .collect()
        } else {
            self.other_categories(key)
                .flat_map(|c| c.words.iter())
                .collect()
        };

        if pool.len() < MIN_POOL {
            pool = self
                .other_categories(key)
                .flat_map(|c| c.words.iter())
                .collect();
        }

        let mut unique: Vec<String> = Vec::with_capacity(pool.len());
        for word in pool {
            if !correct.contains(word) && !unique.contains(word) {
                unique.push(word.clone());
            }
        }
        unique
    }

    fn other_categories<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a CategoryConfig> {
        self.categories.iter().filter(move |c| c.key != key)
    }

    /// Categories that can actually host a round.
    pub fn playable_categories(&self) -> impl Iterator<Item = &CategoryConfig> {
        self.categories
            .iter()
            .filter(|c| c.words.len() >= MIN_POOL && self.distractors(&c.key).len() >= MIN_POOL)
    }
}

#[derive(Deserialize)]
struct BankFile {
    letters: Vec<LetterConfig>,
}

#[derive(Clone, Debug, Default)]
pub struct WordBank {
    letters: Vec<LetterConfig>,
}

impl WordBank {
    pub fn load() -> Self {
        match Self::from_json(WORDS_UK) {
            Ok(bank) => bank,
            Err(err) => {
                tracing::error!("bundled word bank is invalid: {err}");
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let file: BankFile = serde_json::from_str(json)?;

        // Composed and decomposed forms of й/ї must compare equal.
        let letters = file
            .letters
            .into_iter()
            .map(|mut letter| {
                letter.code = normalize_code(&letter.code);
                for category in &mut letter.categories {
                    for word in &mut category.words {
                        *word = nfc(word);
                    }
                }
                letter
            })
            .collect();

        Ok(Self { letters })
    }

    pub fn letter_config(&self, code: &str) -> Option<&LetterConfig> {
        let code = normalize_code(code);
        self.letters.iter().find(|l| l.code == code)
    }

    pub fn available_letters(&self) -> Vec<&str> {
        self.letters.iter().map(|l| l.code.as_str()).collect()
    }
}

/// Lowercased NFC form used for letter lookups.
pub fn normalize_code(code: &str) -> String {
    nfc(code.trim()).to_lowercase()
}

fn nfc(text: &str) -> String {
    ComposingNormalizerBorrowed::new_nfc()
        .normalize(text)
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(json: &str) -> WordBank {
        WordBank::from_json(json).unwrap()
    }

    #[test]
    fn bundled_bank_loads_with_letters() {
        let bank = WordBank::load();
        assert!(!bank.available_letters().is_empty());
        let b = bank.letter_config("б").unwrap();
        assert_eq!(b.name, "Б");
        assert_eq!(
            b.category("pochatok").unwrap().words,
            vec!["банан", "бджола", "булка", "бочка"]
        );
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let bank = WordBank::load();
        assert!(bank.letter_config("Б").is_some());
        assert!(bank.letter_config(" м ").is_some());
        assert!(bank.letter_config("q").is_none());
    }

    #[test]
    fn decomposed_words_are_normalized() {
        // "й" written as и + combining breve
        let bank = bank(
            r#"{"letters":[{"code":"и","name":"И","categories":[
                {"key":"a","label":"A","words":["\u0447\u0430\u0438\u0306"]}]}]}"#,
        );
        let word = &bank.letter_config("и").unwrap().categories[0].words[0];
        assert_eq!(word, "ча\u{439}");
    }

    #[test]
    fn position_category_prefers_other_positions() {
        let bank = WordBank::load();
        let b = bank.letter_config("б").unwrap();
        let pool = b.distractors("pochatok");
        assert!(pool.contains(&"дуб".to_string()));
        assert!(pool.contains(&"собака".to_string()));
        // the animal category is not a position category
        assert!(!pool.contains(&"бегемот".to_string()));
    }

    #[test]
    fn other_category_uses_every_other_category() {
        let bank = WordBank::load();
        let b = bank.letter_config("б").unwrap();
        let pool = b.distractors("tvaryny");
        assert!(pool.contains(&"банан".to_string()));
        assert!(pool.contains(&"дуб".to_string()));
        assert!(pool.contains(&"собака".to_string()));
    }

    #[test]
    fn small_position_pool_falls_back_to_everything() {
        let bank = bank(
            r#"{"letters":[{"code":"x","name":"X","categories":[
                {"key":"pochatok","label":"p","words":["a1","a2","a3","a4"]},
                {"key":"kinets","label":"k","words":["k1","k2"]},
                {"key":"zoo","label":"z","words":["z1","z2","z3"]}]}]}"#,
        );
        let x = bank.letter_config("x").unwrap();
        assert_eq!(x.distractors("pochatok"), vec!["k1", "k2", "z1", "z2", "z3"]);
    }

    #[test]
    fn distractors_skip_correct_words_and_duplicates() {
        let bank = bank(
            r#"{"letters":[{"code":"x","name":"X","categories":[
                {"key":"a","label":"a","words":["w1","w2","w3","w4"]},
                {"key":"b","label":"b","words":["w1","d1","d2"]},
                {"key":"c","label":"c","words":["d2","d3","d4"]}]}]}"#,
        );
        let x = bank.letter_config("x").unwrap();
        assert_eq!(x.distractors("a"), vec!["d1", "d2", "d3", "d4"]);
    }

    #[test]
    fn playable_categories_require_both_pools() {
        let bank = bank(
            r#"{"letters":[{"code":"x","name":"X","categories":[
                {"key":"a","label":"a","words":["w1","w2","w3","w4"]},
                {"key":"b","label":"b","words":["d1","d2","d3"]}]}]}"#,
        );
        let x = bank.letter_config("x").unwrap();
        assert_eq!(x.playable_categories().count(), 0);
    }
}
