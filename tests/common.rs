//! Common test utilities for building projects and boards.
use serde_json::{Value, json};
use skillgraph::prelude::*;
use skillgraph::project::{
    IncidentIntent, PreviousMessage, ProjectRecord, SlotDefinition, Utterance,
};

/// A message with the given content type and payload and no edges.
#[allow(dead_code)]
pub fn message(id: &str, message_type: &str, payload: Value) -> Message {
    Message {
        message_id: id.to_string(),
        message_type: message_type.to_string(),
        payload,
        ..Message::default()
    }
}

#[allow(dead_code)]
pub fn text_message(id: &str, text: &str) -> Message {
    message(id, "text", json!({ "text": text }))
}

/// A plain edge, followed without user input.
#[allow(dead_code)]
pub fn edge(to: &str) -> NextMessage {
    NextMessage {
        message_id: to.to_string(),
        ..NextMessage::default()
    }
}

/// An edge that requires the user to trigger `intent_id`.
#[allow(dead_code)]
pub fn intent_edge(to: &str, intent_id: &str) -> NextMessage {
    NextMessage {
        message_id: to.to_string(),
        intent: Some(IncidentIntent {
            label: String::new(),
            value: intent_id.to_string(),
        }),
        ..NextMessage::default()
    }
}

/// Connects `from` to the edge's target, keeping `previous_message_ids` in sync.
#[allow(dead_code)]
pub fn link(messages: &mut [Message], from: &str, next: NextMessage) {
    let target = next.message_id.clone();
    if let Some(source) = messages.iter_mut().find(|m| m.message_id == from) {
        source.next_message_ids.push(next);
    }
    if let Some(target) = messages.iter_mut().find(|m| m.message_id == target) {
        target.previous_message_ids.push(PreviousMessage {
            message_id: from.to_string(),
        });
    }
}

#[allow(dead_code)]
pub fn intent(id: &str, name: &str) -> Intent {
    Intent {
        id: id.to_string(),
        name: name.to_string(),
        utterances: vec![Utterance {
            text: format!("I want {}", name.to_lowercase()),
            variables: Vec::new(),
        }],
        ..Intent::default()
    }
}

#[allow(dead_code)]
pub fn intent_with_slot(id: &str, name: &str, variable_id: &str, prompt: &str) -> Intent {
    let mut intent = intent(id, name);
    intent.slots.push(SlotDefinition {
        id: Some(format!("{}-slot", id)),
        variable_id: variable_id.to_string(),
        is_required: true,
        prompt: prompt.to_string(),
    });
    intent
}

#[allow(dead_code)]
pub fn variable(id: &str, name: &str) -> Variable {
    Variable {
        id: id.to_string(),
        name: name.to_string(),
        default_value: Value::Null,
    }
}

/// A project whose first message is the root.
#[allow(dead_code)]
pub fn project(
    mut messages: Vec<Message>,
    intents: Vec<Intent>,
    variables: Vec<Variable>,
    platform: &str,
) -> ProjectData {
    let root_messages = messages
        .first()
        .map(|m| vec![m.message_id.clone()])
        .unwrap_or_default();
    if let Some(root) = messages.first_mut() {
        root.is_root = true;
    }
    ProjectData {
        intents,
        entities: Vec::new(),
        variables,
        board: Board {
            messages,
            root_messages,
        },
        project: ProjectRecord {
            name: "Pizza Bot".to_string(),
            platform: platform.to_string(),
            ..ProjectRecord::default()
        },
    }
}

/// Root "start" --#order-pizza--> "ask" --> "confirm" --#yes--> "done"
///                                              `--#no--> "bye"
/// `order-pizza` requires the `size` variable.
#[allow(dead_code)]
pub fn create_pizza_project(platform: &str) -> ProjectData {
    let mut messages = vec![
        text_message("start", "Welcome to pizza bot"),
        text_message("ask", "Let's order"),
        message(
            "confirm",
            "button",
            json!({
                "text": "Confirm?",
                "buttons": [
                    { "title": "Yes", "payload": "yes" },
                    { "title": "No", "payload": "no" },
                ],
            }),
        ),
        text_message("done", "Ordered!"),
        text_message("bye", "Maybe next time"),
    ];
    link(&mut messages, "start", intent_edge("ask", "i-order"));
    link(&mut messages, "ask", edge("confirm"));
    link(&mut messages, "confirm", intent_edge("done", "i-yes"));
    link(&mut messages, "confirm", intent_edge("bye", "i-no"));

    project(
        messages,
        vec![
            intent_with_slot("i-order", "Order Pizza", "v-size", "What size?"),
            intent("i-yes", "Yes"),
            intent("i-no", "No"),
        ],
        vec![variable("v-size", "%size%")],
        platform,
    )
}

/// Assembles with deterministic ids.
#[allow(dead_code)]
pub fn assemble(project: &ProjectData) -> Assembly {
    Assembler::builder(project)
        .with_id_generator(Box::new(SequentialIds::default()))
        .build()
        .assemble()
        .expect("Failed to assemble")
}

#[allow(dead_code)]
pub fn find_node<'a>(nodes: &'a [DialogNode], id: &str) -> &'a DialogNode {
    nodes
        .iter()
        .find(|n| n.dialog_node == id)
        .unwrap_or_else(|| panic!("node '{}' not emitted", id))
}

/// The project JSON as handed over by the fetch collaborator, board envelope
/// and empty-string placeholders included.
#[allow(dead_code)]
pub const PROJECT_JSON: &str = r#"{
    "project": { "platform": "facebook", "name": "Coffee Shop", "created_at": { "date": "2019-08-01" } },
    "board": {
        "board": {
            "messages": [
                {
                    "is_root": true,
                    "message_id": "m-root",
                    "message_type": "text",
                    "payload": { "text": "Hi! Coffee?", "nodeName": "Greeting" },
                    "previous_message_ids": [],
                    "next_message_ids": [
                        { "message_id": "m-menu", "intent": "", "action": "", "conditional": "" }
                    ]
                },
                {
                    "is_root": false,
                    "message_id": "m-menu",
                    "message_type": "quick_replies",
                    "payload": {
                        "text": "Pick a drink",
                        "quick_replies": [
                            { "title": "Latte", "payload": "latte" },
                            { "title": "Espresso", "payload": "espresso" }
                        ]
                    },
                    "previous_message_ids": [{ "message_id": "m-root" }],
                    "next_message_ids": [
                        { "message_id": "m-order", "intent": { "label": "Order Coffee", "value": "i-order" }, "action": "", "conditional": "" },
                        { "message_id": "m-help", "intent": "", "action": { "payload": "Get Help" }, "conditional": "" }
                    ]
                },
                {
                    "is_root": false,
                    "message_id": "m-order",
                    "message_type": "text",
                    "payload": {
                        "text": "Coming right up",
                        "context": [{ "name": "%drink%", "default_value": "latte" }]
                    },
                    "previous_message_ids": [{ "message_id": "m-menu" }],
                    "next_message_ids": []
                },
                {
                    "is_root": false,
                    "message_id": "m-help",
                    "message_type": "carousel",
                    "payload": {
                        "elements": [
                            { "title": "Menu", "image_url": "https://example.com/menu.png", "subtitle": "Our drinks" }
                        ]
                    },
                    "previous_message_ids": [{ "message_id": "m-menu" }],
                    "next_message_ids": []
                }
            ],
            "root_messages": ["m-root"]
        }
    },
    "entities": [
        {
            "id": "e-drink",
            "name": "Drink Type",
            "data": [
                { "value": "latte", "synonyms": "cafe latte, milky coffee" },
                { "value": "espresso", "synonyms": ["shot"] }
            ]
        }
    ],
    "intents": [
        {
            "id": "i-order",
            "name": "Order Coffee",
            "utterances": [
                { "text": "I want a %drink%", "variables": [{ "name": "%drink%", "start_index": 9, "entity": "e-drink" }] },
                { "text": "", "variables": [] }
            ],
            "created_at": {},
            "updated_at": {},
            "is_global": false,
            "slots": [{ "variable_id": "v-drink", "is_required": true, "prompt": "Which drink?" }]
        },
        {
            "id": "i-help",
            "name": "Get Help",
            "utterances": [{ "text": "help", "variables": [] }],
            "created_at": {},
            "updated_at": {},
            "is_global": true,
            "slots": []
        }
    ],
    "variables": [{ "id": "v-drink", "name": "%drink%", "default_value": "" }]
}"#;
