//! Academy application binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize tracing (stderr, so conversation text on stdout stays clean)
//! 3. Build the shared speech output and the requested chat surface
//! 4. Run a line-oriented loop on stdin until EOF

mod cli;

use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use academy_chat::rulebook::lab;
use academy_chat::{
    ChatError, ConversationLog, GeneralAssistant, LabAssistant, LabRuleBook, Turn, VoiceGuide,
};
use academy_core::config::AcademyConfig;
use academy_speech::{
    LineRecognizer, RecognitionOptions, SpeechInput, SpeechOutput, SpeechRecognizer,
    SpeechSynthesizer, TerminalSynthesizer, UtteranceParams,
};

use cli::{CliArgs, Command};

type AppResult<T> = Result<T, Box<dyn Error>>;

fn stdin_lines() -> Lines<BufReader<Stdin>> {
    BufReader::new(tokio::io::stdin()).lines()
}

fn print_turn(turn: &Turn) {
    println!("{}\n", turn.content);
}

/// Report a rejected message. Empty input is skipped silently.
fn report(err: ChatError) {
    match err {
        ChatError::EmptyMessage => {}
        other => tracing::warn!(error = %other, "Message not answered"),
    }
}

fn export(log: &ConversationLog, json: bool) -> AppResult<()> {
    if json {
        println!("{}", log.to_json()?);
    }
    Ok(())
}

/// One speech output per process, shared by every surface that speaks.
fn speech_output(config: &AcademyConfig) -> Arc<SpeechOutput> {
    let synthesizer = TerminalSynthesizer::new(config.speech.words_per_minute);
    Arc::new(SpeechOutput::new(
        Some(Arc::new(synthesizer) as Arc<dyn SpeechSynthesizer>),
        UtteranceParams::from(&config.speech),
    ))
}

async fn run_chat(config: &AcademyConfig, json: bool) -> AppResult<()> {
    let assistant = GeneralAssistant::new(&config.assistant);
    assistant.turns().iter().for_each(print_turn);

    let mut lines = stdin_lines();
    while let Some(line) = lines.next_line().await? {
        match assistant.send(&line).await {
            Ok(turn) => print_turn(&turn),
            Err(e) => report(e),
        }
    }

    export(assistant.dispatcher().log(), json)
}

async fn run_lab(config: &AcademyConfig, context: &str, mute: bool, json: bool) -> AppResult<()> {
    let mut lab_config = config.lab.clone();
    lab_config.speak_responses &= !mute;

    let output = lab_config.speak_responses.then(|| speech_output(config));
    let lab = LabAssistant::new(
        context,
        Arc::new(LabRuleBook::builtin()),
        &lab_config,
        output,
    );
    lab.turns().iter().for_each(print_turn);

    let mut lines = stdin_lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/stop" {
            lab.stop_speaking();
            continue;
        }
        match lab.send(&line).await {
            Ok(turn) => print_turn(&turn),
            Err(e) => report(e),
        }
    }

    lab.stop_speaking();
    export(lab.dispatcher().log(), json)
}

async fn run_voice(config: &AcademyConfig, json: bool) -> AppResult<()> {
    let recognizer = Arc::new(LineRecognizer::new());
    let input = SpeechInput::new(
        Some(Arc::clone(&recognizer) as Arc<dyn SpeechRecognizer>),
        RecognitionOptions::from(&config.voice),
    );
    let guide = VoiceGuide::new(input, speech_output(config), &config.voice);
    guide.turns().iter().for_each(print_turn);

    let mut lines = stdin_lines();
    while let Some(line) = lines.next_line().await? {
        let stream = guide.start_listening()?;
        recognizer.feed(&line);
        let answers = guide.process(stream).await;
        if !answers.is_empty() {
            println!("(heard: {})", guide.transcript());
        }
        answers.iter().for_each(print_turn);
    }

    guide.stop_speaking();
    export(guide.dispatcher().log(), json)
}

fn list_contexts(json: bool) -> AppResult<()> {
    if json {
        let contexts: Vec<serde_json::Value> = lab::CONTEXTS
            .iter()
            .map(|c| serde_json::json!({ "id": c.id, "name": c.name }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&contexts)?);
    } else {
        for c in lab::CONTEXTS {
            println!("{:<16} {}", c.id, c.name);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = AcademyConfig::load_or_default(&config_file);

    // Tracing.
    let level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .init();

    tracing::info!("Starting Academy v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration resolved");

    match args.command {
        Command::Chat => run_chat(&config, args.json).await,
        Command::Lab { context, mute } => run_lab(&config, &context, mute, args.json).await,
        Command::Voice => run_voice(&config, args.json).await,
        Command::Contexts => list_contexts(args.json),
    }
}
