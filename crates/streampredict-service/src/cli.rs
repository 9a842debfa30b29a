use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use streampredict_classifiers::ModelFormat;
use streampredict_core::PredictionRequest;

#[derive(Parser, Debug)]
#[command(name = "streampredict")]
#[command(
    author,
    version,
    about = "Recommend an academic stream from marks, interests and skills"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "streampredict.yaml")]
    pub config: String,

    /// Model artifact path (overrides the config file)
    #[arg(short, long, global = true, env = "STREAMPREDICT_MODEL")]
    pub model: Option<PathBuf>,

    /// Model format: forest or linear (inferred from the extension by default)
    #[arg(short, long, global = true, value_parser = parse_format)]
    pub format: Option<ModelFormat>,

    /// Accept values outside marks 0-100 and ratings 1-5
    #[arg(long, global = true)]
    pub no_range_check: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict a stream for one student
    Predict {
        #[command(flatten)]
        student: StudentArgs,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Answer JSON-lines prediction requests from stdin, one per line
    Serve,

    /// Load the model and print what it contains
    Inspect,
}

/// Marks and ratings, defaulting to the values the input form starts from
#[derive(Args, Debug, Clone)]
pub struct StudentArgs {
    /// Maths marks (0-100)
    #[arg(long, default_value_t = 70, allow_negative_numbers = true)]
    pub maths: i32,

    /// Science marks (0-100)
    #[arg(long, default_value_t = 70, allow_negative_numbers = true)]
    pub science: i32,

    /// English marks (0-100)
    #[arg(long, default_value_t = 70, allow_negative_numbers = true)]
    pub english: i32,

    /// Social Science marks (0-100)
    #[arg(long, default_value_t = 70, allow_negative_numbers = true)]
    pub social_science: i32,

    /// Language marks (0-100)
    #[arg(long, default_value_t = 70, allow_negative_numbers = true)]
    pub language: i32,

    /// Interest in Maths (1-5)
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    pub interest_maths: i32,

    /// Interest in Science (1-5)
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    pub interest_science: i32,

    /// Interest in Business/Commerce (1-5)
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    pub interest_business: i32,

    /// Interest in Arts/Humanities (1-5)
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    pub interest_arts: i32,

    /// Analytical skill (1-5)
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    pub analytical: i32,

    /// Creativity skill (1-5)
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    pub creativity: i32,

    /// Communication skill (1-5)
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    pub communication: i32,

    /// Problem solving skill (1-5)
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    pub problem_solving: i32,
}

impl From<&StudentArgs> for PredictionRequest {
    fn from(args: &StudentArgs) -> Self {
        PredictionRequest {
            maths: args.maths,
            science: args.science,
            english: args.english,
            social_science: args.social_science,
            language: args.language,
            interest_maths: args.interest_maths,
            interest_science: args.interest_science,
            interest_business: args.interest_business,
            interest_arts: args.interest_arts,
            analytical: args.analytical,
            creativity: args.creativity,
            communication: args.communication,
            problem_solving: args.problem_solving,
        }
    }
}

fn parse_format(s: &str) -> Result<ModelFormat, String> {
    s.parse()
}
