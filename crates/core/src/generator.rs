use std::collections::HashSet;

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use thiserror::Error;

use crate::model::{Article, GrammaticalCase, Noun, OPTIONS_PER_QUESTION, Question};

const DISTRACTORS: usize = OPTIONS_PER_QUESTION - 1;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeneratorError {
    #[error("stage dataset has no nouns")]
    EmptyDataset,

    #[error("could not build {expected} distinct options")]
    NotEnoughOptions { expected: usize },
}

//
// ─── GENERATION ────────────────────────────────────────────────────────────────
//

/// Draw the next question from `pool`, refilling it from `all_nouns` when empty.
///
/// The pool is consumed from the end; callers keep it shuffled, so nouns come
/// out in random order without repeats until the pool runs dry. A refill is a
/// freshly shuffled copy of the whole dataset, so stages with fewer nouns than
/// questions simply repeat.
///
/// # Errors
///
/// Returns `GeneratorError::EmptyDataset` if both `pool` and `all_nouns` are empty.
pub fn generate<R: Rng + ?Sized>(
    pool: &mut Vec<Noun>,
    all_nouns: &[Noun],
    rng: &mut R,
) -> Result<Question, GeneratorError> {
    if pool.is_empty() {
        refill(pool, all_nouns, rng);
    }
    let noun = pool.pop().ok_or(GeneratorError::EmptyDataset)?;

    let case = *GrammaticalCase::ALL
        .choose(rng)
        .ok_or(GeneratorError::NotEnoughOptions { expected: 1 })?;
    let correct_article = case.inflect(noun.article());
    let article_options = article_options(correct_article, rng)?;
    let meaning_options = meaning_options(noun.meaning(), all_nouns, rng)?;
    let sentence = noun.sentence_for(case);

    Ok(Question {
        noun,
        case,
        correct_article,
        sentence,
        article_options,
        meaning_options,
    })
}

/// Replace the contents of `pool` with a shuffled copy of `all_nouns`.
pub fn refill<R: Rng + ?Sized>(pool: &mut Vec<Noun>, all_nouns: &[Noun], rng: &mut R) {
    pool.clear();
    pool.extend_from_slice(all_nouns);
    pool.shuffle(rng);
}

fn article_options<R: Rng + ?Sized>(
    correct: Article,
    rng: &mut R,
) -> Result<[Article; OPTIONS_PER_QUESTION], GeneratorError> {
    let others: Vec<Article> = Article::ALL
        .into_iter()
        .filter(|article| *article != correct)
        .collect();

    let mut options = vec![correct];
    options.extend(others.choose_multiple(rng, DISTRACTORS).copied());
    options.shuffle(rng);

    options
        .try_into()
        .map_err(|_| GeneratorError::NotEnoughOptions {
            expected: OPTIONS_PER_QUESTION,
        })
}

fn meaning_options<R: Rng + ?Sized>(
    correct: &str,
    all_nouns: &[Noun],
    rng: &mut R,
) -> Result<[String; OPTIONS_PER_QUESTION], GeneratorError> {
    let mut seen = HashSet::new();
    seen.insert(correct);
    let alternatives: Vec<&str> = all_nouns
        .iter()
        .map(Noun::meaning)
        .filter(|meaning| seen.insert(*meaning))
        .collect();

    let mut options = vec![correct.to_owned()];
    options.extend(
        alternatives
            .choose_multiple(rng, DISTRACTORS)
            .map(|meaning| (*meaning).to_owned()),
    );

    let mut n = 1_usize;
    while options.len() < OPTIONS_PER_QUESTION {
        let placeholder = placeholder(n);
        if !options.contains(&placeholder) {
            options.push(placeholder);
        }
        n += 1;
    }
    options.shuffle(rng);

    options
        .try_into()
        .map_err(|_| GeneratorError::NotEnoughOptions {
            expected: OPTIONS_PER_QUESTION,
        })
}

/// Filler meaning used when a dataset has too few distinct meanings.
#[must_use]
pub fn placeholder(n: usize) -> String {
    format!("…{n}")
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
