use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use movie_search::config::{BASE_URL_VAR, DEFAULT_LLM_MODEL, DEFAULT_MODEL_NAME, LLM_MODEL_VAR, MODEL_NAME_VAR};
use movie_search::{ClientConfig, Outcome, PageController, PageState, SearchClient, TopK};

/// Terminal client for the movie semantic search backend
#[derive(Parser, Debug)]
#[command(name = "movie_search", version)]
struct Cli {
    /// Backend base URL
    #[arg(long, env = BASE_URL_VAR)]
    base_url: String,

    /// Embedding model used for retrieval
    #[arg(long, env = MODEL_NAME_VAR, default_value = DEFAULT_MODEL_NAME)]
    model_name: String,

    /// Language model used for answers
    #[arg(long, env = LLM_MODEL_VAR, default_value = DEFAULT_LLM_MODEL)]
    llm_model: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank movies by similarity to a free-text query
    Search {
        query: String,
        #[arg(long, default_value = "10", value_parser = parse_top_k)]
        top_k: TopK,
    },
    /// Answer a question grounded in the movies matching --query
    Ask {
        question: String,
        #[arg(long)]
        query: String,
        #[arg(long, default_value = "10", value_parser = parse_top_k)]
        top_k: TopK,
    },
    /// Check that the backend is reachable
    Health,
}

fn parse_top_k(value: &str) -> Result<TopK, String> {
    let value: u32 = value.parse().map_err(|e| format!("{}", e))?;
    TopK::new(value).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let config = ClientConfig::new(&cli.base_url)?
        .with_model_name(cli.model_name)
        .with_llm_model(cli.llm_model);
    let client = SearchClient::new(config);

    match cli.command {
        Command::Health => {
            let health = client.health().await?;
            println!("Backend status: {}", health.status);
            if !health.is_ok() {
                bail!("backend reported {:?}", health.status);
            }
        }
        Command::Search { query, top_k } => {
            let controller = PageController::new(client);
            controller.set_query(query).await;
            controller.set_top_k(top_k).await;

            let outcome = controller.search().await;
            let page = controller.snapshot().await;
            if outcome == Outcome::Failed {
                bail!(page.error.unwrap_or_default());
            }
            print_results(&page);
        }
        Command::Ask { question, query, top_k } => {
            let controller = PageController::new(client);
            controller.set_query(query).await;
            controller.set_top_k(top_k).await;
            controller.set_question(question).await;

            let outcome = controller.ask().await;
            let page = controller.snapshot().await;
            if outcome == Outcome::Failed {
                bail!(page.qa_error.unwrap_or_default());
            }
            print_results(&page);
            print_answer(&page);
        }
    }

    Ok(())
}

fn print_results(page: &PageState) {
    println!("Showing {} results for {:?}\n", page.results.len(), page.query);

    for (rank, result) in page.results.iter().enumerate() {
        let year = result.year.map(|y| format!(" ({})", y)).unwrap_or_default();
        println!("{:>2}. {}{}  [{}%]", rank + 1, result.title, year, result.score_percent());
        if !result.genres.is_empty() {
            println!("    {}", result.genres.join(", "));
        }
    }
}

fn print_answer(page: &PageState) {
    let Some(answer) = &page.answer else {
        return;
    };

    println!("\nAnswer:\n{}", answer);

    if !page.citations.is_empty() {
        println!("\nCitations:");
        for citation in &page.citations {
            println!("  {} {} (TMDb ID: {})", citation.reference, citation.title, citation.movie_id);
        }
    }
}
