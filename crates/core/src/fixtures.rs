//! Random post data for seeding and tests.
//!
//! Everything produced here is valid by construction: titles, content, and
//! names are drawn from non-empty word lists.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::{Author, NewPost};

const LOREM: &[&str] = &[
    "alias", "aut", "beatae", "commodi", "consequatur", "corporis", "culpa", "debitis",
    "delectus", "dolor", "dolore", "dolorem", "ducimus", "eius", "eligendi", "enim", "error",
    "esse", "eum", "facilis", "fugiat", "harum", "illum", "impedit", "ipsa", "ipsum", "labore",
    "laborum", "libero", "magnam", "maxime", "minima", "molestiae", "nemo", "nihil", "nisi",
    "nobis", "non", "numquam", "officia", "omnis", "pariatur", "placeat", "praesentium",
    "quae", "quia", "quibusdam", "quis", "ratione", "recusandae", "rem", "repellat", "saepe",
    "sapiente", "sed", "sint", "sit", "soluta", "tempora", "tenetur", "ullam", "unde", "ut",
    "velit", "veniam", "veritatis", "vitae", "voluptas", "voluptatem",
];

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alexis", "Brook", "Camille", "Dara", "Elliot", "Emery", "Finley", "Harper",
    "Jordan", "Kai", "Lennon", "Marlo", "Noor", "Oakley", "Parker", "Quinn", "Reese", "Rowan",
    "Sasha", "Taylor", "Devon", "Wren", "Zion",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Baptiste", "Castillo", "Dubois", "Eriksen", "Fontaine", "Gallagher", "Haddad",
    "Ibarra", "Jablonski", "Kowalski", "Lindqvist", "Moreau", "Nakamura", "Okafor", "Petrov",
    "Quintero", "Rasmussen", "Silva", "Takahashi", "Underwood", "Varga", "Whitfield", "Zhou",
];

/// Number of words in a generated title.
const TITLE_WORDS: usize = 3;

fn pick(list: &'static [&'static str]) -> &'static str {
    list.choose(&mut rand::rng()).copied().unwrap_or("lorem")
}

/// A space-separated run of lorem words.
#[must_use]
pub fn words() -> String {
    (0..TITLE_WORDS)
        .map(|_| pick(LOREM))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One capitalized lorem sentence ending in a period.
#[must_use]
pub fn sentence() -> String {
    let len = rand::rng().random_range(4..=10);
    let mut sentence = (0..len).map(|_| pick(LOREM)).collect::<Vec<_>>().join(" ");

    if let Some(first) = sentence.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    sentence.push('.');
    sentence
}

/// Several lorem sentences joined by spaces.
#[must_use]
pub fn sentences() -> String {
    let count = rand::rng().random_range(3..=5);
    (0..count)
        .map(|_| sentence())
        .collect::<Vec<_>>()
        .join(" ")
}

#[must_use]
pub fn first_name() -> &'static str {
    pick(FIRST_NAMES)
}

#[must_use]
pub fn last_name() -> &'static str {
    pick(LAST_NAMES)
}

/// A random author.
#[must_use]
pub fn author() -> Author {
    Author::new(first_name(), last_name())
        .unwrap_or_else(|_| unreachable!("name lists are non-empty"))
}

/// A random post ready to insert.
#[must_use]
pub fn post() -> NewPost {
    NewPost::new(words(), sentences(), author())
        .unwrap_or_else(|_| unreachable!("lorem output is non-empty"))
}

/// `count` random posts.
#[must_use]
pub fn posts(count: usize) -> Vec<NewPost> {
    (0..count).map(|_| post()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_has_three_words() {
        assert_eq!(words().split(' ').count(), TITLE_WORDS);
    }

    #[test]
    fn test_sentence_shape() {
        for _ in 0..20 {
            let s = sentence();
            assert!(s.ends_with('.'));
            assert!(s.chars().next().is_some_and(|c| c.is_ascii_uppercase()));
            let words = s.trim_end_matches('.').split(' ').count();
            assert!((4..=10).contains(&words), "got {words} words");
        }
    }

    #[test]
    fn test_sentences_count() {
        for _ in 0..20 {
            let count = sentences().matches('.').count();
            assert!((3..=5).contains(&count), "got {count} sentences");
        }
    }

    #[test]
    fn test_posts_are_valid() {
        let batch = posts(10);
        assert_eq!(batch.len(), 10);
        for post in &batch {
            assert!(!post.title().is_empty());
            assert!(!post.content().is_empty());
            assert!(!post.author().first_name().is_empty());
            assert!(!post.author().last_name().is_empty());
        }
    }
}
