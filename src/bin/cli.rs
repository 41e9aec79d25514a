use anyhow::Context;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use erp_gate::authz::{permissions, roles, PolicyMap};
use erp_gate::jwt::JwtConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "erp-gate policy tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List declared roles and the permissions they grant
    Roles,
    /// List the permission catalog
    Permissions,
    /// Evaluate one authorization decision; exits non-zero on deny
    Check {
        #[arg(long)]
        role: String,
        #[arg(long)]
        permission: String,
    },
    /// Mint a development token (requires JWT_SECRET)
    Token {
        #[arg(long)]
        role: String,
        /// User id; a random one is generated when omitted
        #[arg(long)]
        user: Option<Uuid>,
    },
}

fn main() -> anyhow::Result<()> {
    if dotenvy::dotenv().is_err() {
        let crate_env = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        let _ = dotenvy::from_path(crate_env);
    }

    let cli = Cli::parse();
    let policy = PolicyMap::standard();

    match cli.command {
        Commands::Roles => {
            for role in roles::ALL {
                if *role == roles::SUPER_ADMIN {
                    println!("{role} (super-role, bypasses all checks)");
                    continue;
                }
                println!("{role}");
                for perm in policy.permissions_of(role) {
                    println!("  {perm}");
                }
            }
        }
        Commands::Permissions => {
            for perm in permissions::ALL {
                println!("{perm}");
            }
        }
        Commands::Check { role, permission } => {
            let granted = policy.has_permission(Some(&role), &permission);
            println!("{}", if granted { "granted" } else { "denied" });
            if !granted {
                std::process::exit(1);
            }
        }
        Commands::Token { role, user } => {
            if !roles::ALL.contains(&role.as_str()) {
                anyhow::bail!("undeclared role: {role}");
            }
            let jwt = JwtConfig::from_env().context("JWT configuration missing")?;
            let user_id = user.unwrap_or_else(Uuid::new_v4);
            let token = jwt.encode(user_id, &role)?;
            println!("{token}");
        }
    }

    Ok(())
}
