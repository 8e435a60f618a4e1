//! A small branching tale used by unit tests.

use std::collections::BTreeMap;

use super::models::*;

fn node(id: &str, text: &str, choices: Vec<Choice>, ending: Option<Ending>) -> TaleNode {
    TaleNode {
        id: id.to_string(),
        text: text.to_string(),
        choices,
        ending,
    }
}

fn choice(text: &str, next_node_id: &str) -> Choice {
    Choice {
        text: text.to_string(),
        next_node_id: next_node_id.to_string(),
        consequence: None,
    }
}

fn ending(kind: EndingKind, summary: &str) -> Option<Ending> {
    Some(Ending {
        kind,
        summary: summary.to_string(),
    })
}

pub fn sample_tale() -> Tale {
    let mut nodes = BTreeMap::new();
    nodes.insert(
        "start".to_string(),
        node(
            "start",
            "The beast circles the village at dusk.",
            vec![
                choice("Stand and fight", "battle"),
                choice("Slip away at night", "escape"),
            ],
            None,
        ),
    );
    nodes.insert(
        "battle".to_string(),
        node(
            "battle",
            "You face the beast at the gates.",
            vec![
                choice("Strike at its heart", "victory"),
                choice("Hesitate", "defeat"),
            ],
            None,
        ),
    );
    nodes.insert(
        "escape".to_string(),
        node(
            "escape",
            "You leave the village to its fate.",
            Vec::new(),
            ending(EndingKind::Neutral, "You survive, but the village burns."),
        ),
    );
    nodes.insert(
        "victory".to_string(),
        node(
            "victory",
            "The beast falls.",
            Vec::new(),
            ending(EndingKind::Triumph, "The village sings your name."),
        ),
    );
    nodes.insert(
        "defeat".to_string(),
        node(
            "defeat",
            "The beast is faster.",
            Vec::new(),
            ending(EndingKind::Tragic, "Your tale ends at the gates."),
        ),
    );

    Tale {
        id: "beast-at-the-gates".to_string(),
        slug: "beast-at-the-gates".to_string(),
        title: "The Beast at the Gates".to_string(),
        description: "A monster threatens the village; its fate is yours.".to_string(),
        pantheon_id: "greek".to_string(),
        protagonist: "A young hunter".to_string(),
        total_endings: 3,
        estimated_minutes: 5,
        nodes,
        start_node_id: "start".to_string(),
    }
}
