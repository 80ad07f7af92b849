//! Basic example demonstrating the Cloud Foundry API client.
//!
//! Run with:
//! ```
//! CF_API_URL=https://api.example.org CF_ACCESS_TOKEN="$(cf oauth-token)" \
//!     cargo run --example basic
//! ```

use cfapi::{CfClient, ListFilter, PageCursor, Role};

#[tokio::main]
async fn main() -> cfapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Cloud Foundry client...");
    let client = CfClient::from_env()?.with_per_page(100);
    println!("Connected to: {}", client.base_url());

    // First page of organizations
    println!("\n--- Listing Organizations (first page) ---");
    let orgs = client
        .organizations()
        .list(&ListFilter::new(), PageCursor::new(1, 10))
        .await?;
    println!(
        "Showing {} of {} organizations",
        orgs.len(),
        orgs.pagination.total_results
    );
    for org in &orgs {
        println!("  - {} ({})", org.name, org.guid);
    }

    // Every space of the first organization, across all pages
    if let Some(org) = orgs.resources.first() {
        println!("\n--- Spaces in {} ---", org.name);
        let spaces = client
            .spaces()
            .list_all(&ListFilter::new().organization_guids([org.guid.as_str()]))
            .await?;
        for space in &spaces {
            println!("  - {}", space.name);
        }

        // Apps in those spaces, page by page
        if !spaces.is_empty() {
            println!("\n--- Apps ---");
            let filter = ListFilter::new()
                .space_guids(spaces.iter().map(|s| s.guid.clone()))
                .order_by("name");
            let mut pager = client.apps().pager(&filter, PageCursor::first_page(50));
            while let Some(page) = pager.next_page().await? {
                for app in &page {
                    println!("  - {} [{}]", app.name, app.state);
                }
            }
        }
    }

    // Roles with their organizations side-loaded
    println!("\n--- Organization Roles ---");
    let (roles, included) = client
        .roles()
        .list_all_with_included(&ListFilter::new().include("organization"))
        .await?;
    let orgs: Vec<cfapi::Organization> = included.get("organizations")?;
    let org_roles: Vec<&Role> = roles
        .iter()
        .filter(|r| !r.role_type.is_space_role())
        .collect();
    println!(
        "{} organization roles across {} organizations",
        org_roles.len(),
        orgs.len()
    );

    Ok(())
}
