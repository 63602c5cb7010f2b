//! Display functions for command results

use super::formatters::{create_progress_bar, digit_width, matching_tuple, origin_label, round_line};
use crate::commands::BatchStatistics;
use crate::core::Alphabet;
use crate::solver::{GameOutcome, GameReport};
use colored::Colorize;

/// Print the round-by-round summary of one game
pub fn print_game_report(report: &GameReport, alphabet: &Alphabet, verbose: bool) {
    let width = digit_width(report.round_count());

    println!("\n{}", "Results:".bright_cyan().bold());
    for round in &report.rounds {
        println!("{}", round_line(alphabet, round, width));

        if verbose {
            let answer = if round.probe_matched { "yes" } else { "no" };
            println!(
                "  {:width$}  probe {answer:<3} → {} candidates",
                "",
                round.after_probe
            );
            if let Some(record) = &round.guess {
                println!(
                    "  {:width$}  guess {:<3} → {} candidates ({})",
                    "",
                    record.correct,
                    record.remaining,
                    origin_label(&record.origin).bright_black()
                );
            }
        }
    }

    println!();
    match report.outcome {
        GameOutcome::Solved(answer) => println!(
            "{}",
            format!(
                "Solved {} in {} rounds",
                alphabet.render(&answer),
                report.round_count()
            )
            .green()
            .bold()
        ),
        GameOutcome::Impossible => println!(
            "{}",
            "That combination of responses is impossible."
                .red()
                .bold()
        ),
    }
}

/// Print aggregate statistics of a batch run
pub fn print_batch_statistics(stats: &BatchStatistics, alphabet: &Alphabet) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BATCH RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Games played:     {}", stats.games);
    println!(
        "   Solved:           {}",
        stats.solved.to_string().green()
    );
    if stats.impossible > 0 {
        println!(
            "   Impossible:       {}",
            stats.impossible.to_string().red()
        );
    }
    println!(
        "   Average rounds:   {}",
        format!("{:.3}", stats.average_rounds())
            .bright_yellow()
            .bold()
    );
    if let Some(min) = stats.min_rounds {
        println!("   Best case:        {}", min.to_string().green());
    }
    if let Some((answer, rounds)) = &stats.worst_answer {
        println!(
            "   Worst case:       {} {}",
            rounds.to_string().yellow(),
            format!("for {}", matching_tuple(alphabet, answer)).bright_black()
        );
    }
    println!("   Time taken:       {:.2}s", stats.elapsed.as_secs_f64());
    if stats.games > 0 {
        println!(
            "   Time per game:    {:.1}ms",
            stats.elapsed.as_secs_f64() * 1000.0 / stats.games as f64
        );
    }

    if stats.distribution.is_empty() {
        return;
    }

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    let max_count = stats.distribution.values().copied().max().unwrap_or(0);
    let width = stats
        .distribution
        .keys()
        .last()
        .map_or(1, |&rounds| digit_width(rounds));
    for (&rounds, &count) in &stats.distribution {
        let pct = count as f64 / stats.solved as f64 * 100.0;
        let bar = create_progress_bar(count, max_count, 40);
        println!(
            "   {rounds:>width$}: {} {count:6} ({pct:5.1}%)",
            bar.green()
        );
    }
}
