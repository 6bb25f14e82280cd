use tokio::io::{AsyncBufReadExt, BufReader};

use titanic_chat::config::{ChatConfig, PredictorBackend, parse_fare_cap};
use titanic_chat::interview::{ConversationEngine, Message, Speaker};
use titanic_chat::services::{create_predictor, create_receptionist};
use titanic_chat::session::ChatSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut config = ChatConfig::default();
    if let Ok(url) = std::env::var("TITANIC_PREDICTOR_URL") {
        config.predictor = PredictorBackend::Http { url };
    }
    if let Ok(url) = std::env::var("TITANIC_RECEPTIONIST_URL") {
        config.receptionist_url = Some(url);
    }
    if let Ok(raw) = std::env::var("TITANIC_FARE_CAP") {
        config.fare_cap = parse_fare_cap(&raw)?;
    }

    eprintln!("🚢 Titanic Chat v{}", env!("CARGO_PKG_VERSION"));
    match &config.predictor {
        PredictorBackend::Http { url } => eprintln!("   Predictor: {url}"),
        PredictorBackend::Local => eprintln!("   Predictor: local simulation"),
    }
    eprintln!("   Type your answers and press Enter. /reset to start over, /quit to exit.\n");

    let predictor = create_predictor(&config);
    let receptionist = create_receptionist(&config);
    let engine = ConversationEngine::from_config(&config);
    let mut session = ChatSession::new(engine, predictor, receptionist);

    for message in session.transcript() {
        print_message(message);
    }
    eprint!("> ");

    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            eprint!("> ");
            continue;
        }
        if line == "/quit" {
            break;
        }

        let appended = if line == "/reset" {
            session.reset(Some("Let's start fresh!".to_string()))
        } else {
            session.handle_line(&line).await
        };

        for message in &appended {
            // The user just typed their own line; only echo the replies.
            if message.speaker != Speaker::User {
                print_message(message);
            }
        }

        if session.is_done() {
            eprintln!("\nThe interview is complete. /reset to try once more, /quit to exit.");
        }
        eprint!("> ");
    }

    Ok(())
}

fn print_message(message: &Message) {
    let label = match message.speaker {
        Speaker::User => "You",
        Speaker::Assistant => "Rose",
        Speaker::Receptionist => "Receptionist",
    };
    println!("{label}: {}", message.text);
}
