//! The `javaprep flashcards` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::Rng;

use javaprep_core::flashcard::FlashcardDeck;
use javaprep_core::model::Question;

use super::{make_rng, parse_status, Workspace};

pub fn execute(
    config_path: Option<PathBuf>,
    bank: Option<PathBuf>,
    status: Option<String>,
    seed: Option<u64>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let status = status.as_deref().map(parse_status).transpose()?;
    let tracker = Workspace::open(config_path.as_deref(), bank)?.tracker(data_dir);

    let cards: Vec<Question> = tracker
        .questions()
        .iter()
        .filter(|q| status.map_or(true, |s| q.status == s))
        .cloned()
        .collect();
    if cards.is_empty() {
        println!("No cards to review.");
        return Ok(());
    }

    let mut rng = make_rng(seed);
    let deck = FlashcardDeck::new(cards, &mut rng);
    println!("Keys: f flip, n next, p prev, s shuffle, q quit");

    let stdin = std::io::stdin();
    review(deck, &mut rng, stdin.lock(), &mut std::io::stdout())
}

fn review<R: Rng, I: BufRead, W: Write>(
    mut deck: FlashcardDeck,
    rng: &mut R,
    input: I,
    out: &mut W,
) -> Result<()> {
    show_card(&deck, out)?;
    for line in input.lines() {
        let line = line.context("failed to read input")?;
        match line.trim() {
            "f" | "" => deck.flip(),
            "n" => deck.next(),
            "p" => deck.prev(),
            "s" => {
                deck.shuffle(rng);
                writeln!(out, "Shuffled.")?;
            }
            "q" => break,
            other => {
                writeln!(out, "Unknown key: {other}")?;
                continue;
            }
        }
        show_card(&deck, out)?;
    }
    Ok(())
}

fn show_card<W: Write>(deck: &FlashcardDeck, out: &mut W) -> Result<()> {
    let Some(card) = deck.current() else {
        return Ok(());
    };
    writeln!(
        out,
        "\n[{}/{}] {} ({}, {})",
        deck.position() + 1,
        deck.len(),
        card.category,
        card.difficulty,
        card.status
    )?;
    if deck.is_flipped() {
        writeln!(out, "{}", card.answer.trim())?;
    } else {
        writeln!(out, "{}", card.question)?;
    }
    Ok(())
}
