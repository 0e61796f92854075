use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use skillgraph::project::{
    Board, IncidentIntent, Intent, Message, NextMessage, PreviousMessage, ProjectData,
    ProjectRecord, SlotDefinition, Utterance, Variable,
};
use std::fs;

/// A CLI tool to generate random, loop-free design projects for the converter
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_project.json")]
    output: String,

    /// Number of messages on the board
    #[arg(long, default_value_t = 50)]
    messages: usize,

    /// Number of intents
    #[arg(long, default_value_t = 8)]
    intents: usize,

    /// Maximum number of successors per message
    #[arg(long, default_value_t = 3)]
    fan_out: usize,

    /// Target platform written into the project record
    #[arg(long, default_value = "generic")]
    platform: String,

    /// Seed for repeatable output
    #[arg(long)]
    seed: Option<u64>,
}

const CONTENT_TYPES: [&str; 6] = ["text", "text", "button", "quick_replies", "image", "delay"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.messages == 0 || cli.intents == 0 {
        eprintln!("Error: --messages and --intents must both be at least 1");
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!(
        "Generating project ({} messages, {} intents)...",
        cli.messages, cli.intents
    );

    let variables = generate_variables(cli.intents);
    let intents = generate_intents(&mut rng, cli.intents, &variables);
    let board = generate_board(&mut rng, cli.messages, cli.fan_out.max(1), &intents);

    let project = ProjectData {
        intents,
        entities: Vec::new(),
        variables,
        board,
        project: ProjectRecord {
            name: "Generated Project".to_string(),
            platform: cli.platform,
            ..ProjectRecord::default()
        },
    };

    let json_output = serde_json::to_string_pretty(&project)?;
    fs::write(&cli.output, json_output)?;

    println!("Successfully generated and saved project to '{}'", cli.output);

    Ok(())
}

fn generate_variables(count: usize) -> Vec<Variable> {
    (0..count)
        .map(|i| Variable {
            id: format!("var-{}", i),
            name: format!("%value {}%", i),
            default_value: json!(""),
        })
        .collect()
}

/// Roughly a third of the intents get a required slot.
fn generate_intents(rng: &mut StdRng, count: usize, variables: &[Variable]) -> Vec<Intent> {
    let intents: Vec<Intent> = (0..count)
        .map(|i| {
            let slots = if rng.random_bool(0.33) {
                vec![SlotDefinition {
                    id: Some(format!("slot-{}", i)),
                    variable_id: variables[i].id.clone(),
                    is_required: true,
                    prompt: format!("What is value {}?", i),
                }]
            } else {
                Vec::new()
            };
            Intent {
                id: format!("intent-{}", i),
                name: format!("Intent {}", i),
                utterances: (0..rng.random_range(1..=4))
                    .map(|u| Utterance {
                        text: format!("example {} of intent {}", u, i),
                        variables: Vec::new(),
                    })
                    .collect(),
                slots,
                ..Intent::default()
            }
        })
        .collect();
    println!("-> Generated {} intents.", intents.len());
    intents
}

/// Builds a tree of messages: every message links only to messages with a
/// higher index, so the board never loops.
fn generate_board(rng: &mut StdRng, count: usize, fan_out: usize, intents: &[Intent]) -> Board {
    let mut messages: Vec<Message> = (0..count)
        .map(|i| {
            let message_type = CONTENT_TYPES[rng.random_range(0..CONTENT_TYPES.len())];
            Message {
                message_id: format!("msg-{}", i),
                message_type: message_type.to_string(),
                payload: payload_for(message_type, i),
                is_root: i == 0,
                ..Message::default()
            }
        })
        .collect();

    let mut next_child = 1;
    for parent in 0..count {
        if next_child >= count {
            break;
        }
        let children = rng.random_range(1..=fan_out).min(count - next_child);
        for _ in 0..children {
            let intent = rng
                .random_bool(0.6)
                .then(|| &intents[rng.random_range(0..intents.len())]);
            let child_id = messages[next_child].message_id.clone();
            let parent_id = messages[parent].message_id.clone();
            messages[parent].next_message_ids.push(NextMessage {
                message_id: child_id,
                intent: intent.map(|intent| IncidentIntent {
                    label: intent.name.clone(),
                    value: intent.id.clone(),
                }),
                ..NextMessage::default()
            });
            messages[next_child]
                .previous_message_ids
                .push(PreviousMessage { message_id: parent_id });
            next_child += 1;
        }
    }
    println!("-> Generated {} messages.", messages.len());

    Board {
        root_messages: vec![messages[0].message_id.clone()],
        messages,
    }
}

fn payload_for(message_type: &str, index: usize) -> serde_json::Value {
    match message_type {
        "button" => json!({
            "text": format!("Pick one ({})", index),
            "buttons": [
                { "title": "Yes", "payload": "yes" },
                { "title": "No", "payload": "no" },
            ],
        }),
        "quick_replies" => json!({
            "text": format!("Quick pick ({})", index),
            "quick_replies": [{ "title": "Sure", "payload": "sure" }],
        }),
        "image" => json!({
            "title": format!("Image {}", index),
            "image_url": format!("https://example.com/{}.png", index),
        }),
        "delay" => json!({ "time": 1000 }),
        _ => json!({ "text": format!("Message {}", index) }),
    }
}
