//! Command enum definitions

use crate::args::*;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display version information
    Version,

    /// Tabulate the score multiplier of a boosting policy over a range of recencies
    #[command(long_about = r#"
Tabulate the multiplier a boosting policy applies to the base score.

The step policy multiplies the base score by the tier value directly; the
decay policies compute base * (1 + weight * curve(recency)).

Examples:
  recency-cli curve --policy step --to 150 --step 6
  recency-cli curve --function gauss --scale 48 --decay 0.3"#)]
    Curve(CurveArgs),

    /// Hours elapsed since an encoded term timestamp
    Recency(RecencyArgs),

    /// Encode an instant as whole hours since the reference epoch
    Encode(EncodeArgs),

    /// Rank the documents of a fixture segment with BM25 and recency boosting
    Search(SearchArgs),

    /// Print the explanation tree of one document's score
    Explain(ExplainArgs),

    /// Print the effective configuration
    Config,
}
