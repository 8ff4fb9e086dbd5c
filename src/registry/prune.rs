use super::RegistryClient;
use crate::menu::CONFIRM_TOKEN;
use crate::output;
use std::collections::BTreeSet;
use std::io::{self, Write};

/// Per-run tally of tag deletions. In report mode, `deleted` counts tags
/// that would have been deleted.
#[derive(Default)]
pub struct PruneOutcome {
    pub deleted: usize,
    pub failed: usize,
}

impl PruneOutcome {
    fn absorb(&mut self, other: PruneOutcome) {
        self.deleted += other.deleted;
        self.failed += other.failed;
    }
}

/// Resolve an operator selection ("1,3-5") against a 1-based displayed list
/// of `count` items into 0-based indices. Tokens that do not parse or fall
/// outside the list are silently skipped.
pub fn parse_selection(input: &str, count: usize) -> Vec<usize> {
    let mut picked = BTreeSet::new();

    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if let Some((start, end)) = token.split_once('-') {
            if let (Ok(start), Ok(end)) = (
                start.trim().parse::<usize>(),
                end.trim().parse::<usize>(),
            ) {
                for index in start..=end {
                    if index >= 1 && index <= count {
                        picked.insert(index - 1);
                    }
                }
            }
        } else if let Ok(index) = token.parse::<usize>() {
            if index >= 1 && index <= count {
                picked.insert(index - 1);
            }
        }
    }

    picked.into_iter().collect()
}

/// Walk one repository: list its tags, resolve each tag's digest, delete by
/// digest. Every per-tag failure is tallied and the walk keeps going. In
/// report mode the digests are still resolved but nothing is deleted.
pub fn prune_repository(client: &RegistryClient, repository: &str, dry_run: bool) -> PruneOutcome {
    let mut outcome = PruneOutcome::default();

    let tags = match client.list_tags(repository) {
        Ok(tags) => tags,
        Err(e) => {
            output::print_tag_error(repository, "*", &e.to_string());
            outcome.failed += 1;
            return outcome;
        }
    };

    if tags.is_empty() {
        output::print_info(&format!("{repository}: no tags, skipping"));
        return outcome;
    }

    for tag in &tags {
        let digest = match client.resolve_digest(repository, tag) {
            Ok(digest) => digest,
            Err(e) => {
                output::print_tag_error(repository, tag, &e.to_string());
                outcome.failed += 1;
                continue;
            }
        };

        if dry_run {
            output::print_tag_would_delete(repository, tag, &digest);
            outcome.deleted += 1;
            continue;
        }

        match client.delete_manifest(repository, &digest) {
            Ok(()) => {
                output::print_tag_deleted(repository, tag);
                outcome.deleted += 1;
            }
            Err(e) => {
                output::print_tag_error(repository, tag, &e.to_string());
                outcome.failed += 1;
            }
        }
    }

    outcome
}

/// Interactive registry prune: enumerate repositories, let the operator
/// pick, confirm, then walk the picked repositories. Cancellation at either
/// prompt deletes nothing and is not an error.
pub fn run(client: &RegistryClient, dry_run: bool) -> anyhow::Result<PruneOutcome> {
    let repositories = client.list_repositories()?;
    if repositories.is_empty() {
        output::print_info("registry contains no repositories");
        return Ok(PruneOutcome::default());
    }

    println!("Repositories:");
    for (index, name) in repositories.iter().enumerate() {
        output::print_repository_line(index + 1, name);
    }
    println!();

    let choice = read_input("repositories to prune [all, or e.g. 1,3-5] > ")?;
    let picked: Vec<usize> = if choice == "all" {
        (0..repositories.len()).collect()
    } else {
        parse_selection(&choice, repositories.len())
    };

    if picked.is_empty() {
        output::print_info("no repositories selected, nothing to do");
        return Ok(PruneOutcome::default());
    }

    if !dry_run {
        let prompt = format!(
            "Delete all tags in {} repositories? Type '{}' to proceed > ",
            picked.len(),
            CONFIRM_TOKEN
        );
        if read_input(&prompt)? != CONFIRM_TOKEN {
            output::print_info("cancelled, nothing deleted");
            return Ok(PruneOutcome::default());
        }
    }

    let mut outcome = PruneOutcome::default();
    for index in picked {
        outcome.absorb(prune_repository(client, &repositories[index], dry_run));
    }

    output::print_prune_summary(outcome.deleted, outcome.failed);
    if !dry_run {
        output::print_gc_reminder();
    }

    Ok(outcome)
}

fn read_input(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buffer = String::new();
    io::stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}
