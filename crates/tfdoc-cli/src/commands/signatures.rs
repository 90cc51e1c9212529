//! Signatures command - list the document signature registry.

use clap::Args;
use console::style;

use tfdoc_core::{all_signatures, lookup_signature, DocumentSignature, DocumentType};

/// Arguments for the signatures command.
#[derive(Args)]
pub struct SignaturesArgs {
    /// Only show one document type (name or key, e.g. "bill_of_lading")
    #[arg(short, long = "type")]
    document_type: Option<String>,
}

pub async fn run(args: SignaturesArgs) -> anyhow::Result<()> {
    let signatures: Vec<&DocumentSignature> = match &args.document_type {
        Some(name) => {
            let document_type = DocumentType::from_name(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown document type: {}", name))?;
            let signature = lookup_signature(document_type).ok_or_else(|| {
                anyhow::anyhow!("{} has no signature", document_type)
            })?;
            vec![signature]
        }
        None => all_signatures().iter().collect(),
    };

    for (i, signature) in signatures.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_signature(signature);
    }

    Ok(())
}

fn print_signature(signature: &DocumentSignature) {
    let document_type = signature.document_type;
    println!(
        "{} ({})",
        style(document_type.name()).bold(),
        document_type.key()
    );

    println!("  Start patterns:");
    for pattern in &signature.start_patterns {
        println!("    {}", pattern.as_str());
    }

    println!("  End patterns:");
    for pattern in &signature.end_patterns {
        println!("    {}", pattern.as_str());
    }

    println!("  Keywords: {}", signature.keywords.join(", "));
}
