//! # Command Line
//!
//! `storefront <group> <command>`; every command prints JSON on stdout and
//! logs on stderr.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use storefront_core::{ContactForm, NewsletterForm, ReviewSubmission};

/// Storefront cart and form tooling
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version)]
#[command(about = "Shopping cart, form validation and reviews for the storefront")]
pub struct Cli {
    /// Directory holding the durable cart (overrides STOREFRONT_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect and change the cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Validate form submissions
    #[command(subcommand)]
    Form(FormCommand),

    /// List and approve reviews
    #[command(subcommand)]
    Reviews(ReviewsCommand),

    /// Site settings
    #[command(subcommand)]
    Site(SiteCommand),
}

#[derive(Subcommand, Debug)]
pub enum CartCommand {
    /// Print the cart with totals
    Show,

    /// Add units of a product at a unit price
    Add {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
        #[arg(allow_negative_numbers = true)]
        price: f64,
    },

    /// Remove a product
    Remove { id: String },

    /// Set the quantity of a product (0 removes it)
    Set {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Empty the cart and delete its record
    Clear,

    /// Print the checkout-session request body
    Checkout,
}

#[derive(Subcommand, Debug)]
pub enum FormCommand {
    /// Validate a contact form submission
    Contact(ContactArgs),

    /// Validate a newsletter signup
    Newsletter(NewsletterArgs),
}

#[derive(Args, Debug)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub message: Option<String>,
    /// Hidden bot-trap field
    #[arg(long)]
    pub honeypot: Option<String>,
}

impl From<ContactArgs> for ContactForm {
    fn from(args: ContactArgs) -> Self {
        ContactForm {
            name: args.name,
            email: args.email,
            message: args.message,
            honeypot: args.honeypot,
        }
    }
}

#[derive(Args, Debug)]
pub struct NewsletterArgs {
    #[arg(long)]
    pub email: Option<String>,
    /// Hidden bot-trap field
    #[arg(long)]
    pub honeypot: Option<String>,
}

impl From<NewsletterArgs> for NewsletterForm {
    fn from(args: NewsletterArgs) -> Self {
        NewsletterForm {
            email: args.email,
            honeypot: args.honeypot,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ReviewsCommand {
    /// Print displayable reviews from a feed file, newest first
    List { file: PathBuf },

    /// Approve a review submission
    Approve(ApproveArgs),
}

#[derive(Args, Debug)]
pub struct ApproveArgs {
    /// Star rating (1-5)
    #[arg(long)]
    pub rating: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub review: String,
    #[arg(long)]
    pub email: Option<String>,
}

impl From<ApproveArgs> for ReviewSubmission {
    fn from(args: ApproveArgs) -> Self {
        ReviewSubmission {
            rating: args.rating,
            name: args.name,
            review: args.review,
            email: args.email,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum SiteCommand {
    /// Print presale mode and configuration
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cart_add() {
        let cli = Cli::parse_from(["storefront", "cart", "add", "spray-100ml", "2", "19.99"]);
        match cli.command {
            Command::Cart(CartCommand::Add { id, quantity, price }) => {
                assert_eq!(id, "spray-100ml");
                assert_eq!(quantity, 2);
                assert_eq!(price, 19.99);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_negative_quantity_reaches_the_cart() {
        let cli = Cli::parse_from(["storefront", "cart", "set", "a", "-1"]);
        assert!(matches!(
            cli.command,
            Command::Cart(CartCommand::Set { quantity: -1, .. })
        ));
    }

    #[test]
    fn test_global_data_dir() {
        let cli = Cli::parse_from(["storefront", "site", "status", "--data-dir", "/tmp/x"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }
}
