use astrapatch_core::models::CrewMember;

use crate::board::Region;
use crate::dashboard::Dashboard;

pub const EMPTY: &str = "No crew data available.";
pub const FALLBACK: &str = "Unable to load crew data.";

/// Astronauts currently aboard the ISS. Returns how many were listed.
pub async fn load(dashboard: &Dashboard) -> usize {
    let board = dashboard.board();
    match dashboard.client().iss_crew().await {
        Ok(response) => {
            let crew: Vec<CrewMember> = response
                .results
                .unwrap_or_default()
                .into_iter()
                .map(CrewMember::from_payload)
                .collect();
            board.replace(Region::Crew, render_crew(&crew));
            crew.len()
        }
        Err(e) => {
            tracing::warn!("Failed to load crew: {}", e);
            board.set_text(Region::Crew, FALLBACK);
            0
        }
    }
}

pub fn render_crew(crew: &[CrewMember]) -> Vec<String> {
    if crew.is_empty() {
        return vec![EMPTY.to_string()];
    }
    crew.iter()
        .map(|member| {
            format!(
                "{} ({}) | Portrait: {}",
                member.name, member.agency, member.profile_image
            )
        })
        .collect()
}
