use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::content::{ContentCatalog, Confidence, Deity, Relationship, RelationshipKind};

use super::models::{Difficulty, QuestionType, QuizQuestion};

/// Build a multiple-choice quiz from the relationship graph, scoped to
/// one pantheon or the whole catalog. Remaining slots fill with domain
/// questions, capped by difficulty.
pub fn generate_quiz(
    catalog: &ContentCatalog,
    pantheon_id: Option<&str>,
    count: usize,
    difficulty: Difficulty,
) -> Vec<QuizQuestion> {
    let deities: Vec<&Deity> = match pantheon_id {
        Some(id) => catalog.deities_for_pantheon(id),
        None => catalog.deities().iter().collect(),
    };
    let relationships: Vec<&Relationship> = match pantheon_id {
        Some(id) => catalog.relationships_for_pantheon(id),
        None => catalog.relationships().iter().collect(),
    };
    generate_from(&deities, &relationships, count, difficulty)
}

fn question_text(question_type: QuestionType, deity_name: &str) -> String {
    match question_type {
        QuestionType::Parent => format!("Who is a parent of {}?", deity_name),
        QuestionType::Child => format!("Who is a child of {}?", deity_name),
        QuestionType::Sibling => format!("Who is a sibling of {}?", deity_name),
        QuestionType::Spouse => format!("Who is the spouse/consort of {}?", deity_name),
        QuestionType::Domain => format!("What is {}'s primary domain?", deity_name),
    }
}

fn generate_from(
    deities: &[&Deity],
    relationships: &[&Relationship],
    count: usize,
    difficulty: Difficulty,
) -> Vec<QuizQuestion> {
    let mut rng = rand::thread_rng();
    let mut questions: Vec<QuizQuestion> = Vec::new();
    let mut used: HashSet<String> = HashSet::new();

    let by_id: HashMap<&str, &Deity> =
        deities.iter().map(|d| (d.id.as_str(), *d)).collect();

    // Only well-attested family edges make fair questions.
    let mut valid: Vec<&Relationship> = relationships
        .iter()
        .copied()
        .filter(|r| {
            matches!(
                r.kind,
                RelationshipKind::ParentOf
                    | RelationshipKind::SiblingOf
                    | RelationshipKind::SpouseOf
            ) && matches!(r.confidence, Confidence::High | Confidence::Medium)
        })
        .collect();
    valid.shuffle(&mut rng);

    for rel in valid {
        if questions.len() >= count {
            break;
        }
        let (Some(&from), Some(&to)) = (
            by_id.get(rel.from_deity_id.as_str()),
            by_id.get(rel.to_deity_id.as_str()),
        ) else {
            continue;
        };

        let ask_about_to = rng.gen_bool(0.5);
        if ask_about_to {
            // Only a parent edge reads naturally in reverse.
            if rel.kind != RelationshipKind::ParentOf {
                continue;
            }
            let key = format!("{}-parent", to.id);
            if !used.insert(key) {
                continue;
            }
            questions.push(QuizQuestion {
                id: format!("rel-{}", questions.len()),
                deity_id: to.id.clone(),
                deity_name: to.name.clone(),
                question_type: QuestionType::Parent,
                question_text: question_text(QuestionType::Parent, &to.name),
                correct_answer: from.name.clone(),
                correct_deity_id: from.id.clone(),
                options: build_options(&mut rng, deities, from, &to.pantheon_id),
                difficulty,
            });
        } else {
            let question_type = match rel.kind {
                RelationshipKind::ParentOf => QuestionType::Child,
                RelationshipKind::SiblingOf => QuestionType::Sibling,
                RelationshipKind::SpouseOf => QuestionType::Spouse,
                _ => continue,
            };
            let key = format!("{}-{}-{}", from.id, question_type.label(), to.id);
            if !used.insert(key) {
                continue;
            }
            questions.push(QuizQuestion {
                id: format!("rel-{}", questions.len()),
                deity_id: from.id.clone(),
                deity_name: from.name.clone(),
                question_type,
                question_text: question_text(question_type, &from.name),
                correct_answer: to.name.clone(),
                correct_deity_id: to.id.clone(),
                options: build_options(&mut rng, deities, to, &from.pantheon_id),
                difficulty,
            });
        }
    }

    let domain_cap = difficulty
        .domain_question_cap()
        .min(count.saturating_sub(questions.len()));
    let mut with_domains: Vec<&Deity> = deities
        .iter()
        .copied()
        .filter(|d| !d.domains.is_empty())
        .collect();
    with_domains.shuffle(&mut rng);

    let mut domain_added = 0;
    for deity in with_domains {
        if questions.len() >= count || domain_added >= domain_cap {
            break;
        }
        let key = format!("{}-domain", deity.id);
        if !used.insert(key) {
            continue;
        }

        let correct = deity.domains[0].clone();
        let mut other_domains: Vec<&str> = Vec::new();
        for d in deities {
            if d.id == deity.id {
                continue;
            }
            for domain in &d.domains {
                if domain != &correct && !other_domains.contains(&domain.as_str()) {
                    other_domains.push(domain);
                }
            }
        }
        let mut options: Vec<String> = other_domains
            .choose_multiple(&mut rng, 3)
            .map(|s| s.to_string())
            .collect();
        options.push(correct.clone());
        options.shuffle(&mut rng);

        questions.push(QuizQuestion {
            id: format!("domain-{}", questions.len()),
            deity_id: deity.id.clone(),
            deity_name: deity.name.clone(),
            question_type: QuestionType::Domain,
            question_text: question_text(QuestionType::Domain, &deity.name),
            correct_answer: correct,
            correct_deity_id: deity.id.clone(),
            options,
            difficulty,
        });
        domain_added += 1;
    }

    questions.shuffle(&mut rng);
    questions.truncate(count);
    questions
}

/// One correct name plus three wrong ones, preferring distractors from
/// the asked deity's own pantheon, shuffled.
fn build_options(
    rng: &mut impl Rng,
    deities: &[&Deity],
    answer: &Deity,
    pantheon_id: &str,
) -> Vec<String> {
    let same_pantheon: Vec<&Deity> = deities
        .iter()
        .copied()
        .filter(|d| d.id != answer.id && d.pantheon_id == pantheon_id)
        .collect();
    let mut wrong: Vec<String> = same_pantheon
        .choose_multiple(rng, 3)
        .map(|d| d.name.clone())
        .collect();

    if wrong.len() < 3 {
        let other: Vec<&Deity> = deities
            .iter()
            .copied()
            .filter(|d| d.id != answer.id && d.pantheon_id != pantheon_id)
            .collect();
        wrong.extend(
            other
                .choose_multiple(rng, 3 - wrong.len())
                .map(|d| d.name.clone()),
        );
    }

    let mut options = vec![answer.name.clone()];
    options.extend(wrong);
    options.shuffle(rng);
    options
}
