//! Deterministic template backend.

use async_trait::async_trait;

use super::{DescriptionBackend, DescriptionRequest, NarrativeError};
use crate::models::{MetricKey, Position};

/// Threshold-driven prose generation. No I/O, never fails; the service
/// layer still guards it with the same timeout and fallback as any other
/// backend.
#[derive(Debug, Default)]
pub struct TemplateBackend;

impl TemplateBackend {
    pub fn new() -> Self {
        Self
    }

    fn group_summary(&self, request: &DescriptionRequest) -> String {
        let avg1 = |metric| fmt_avg(request.average(metric), 1);
        let avg2 = |metric| fmt_avg(request.average(metric), 2);

        match request.position {
            Position::Qb => format!(
                "This group of {} quarterbacks shows diverse skill sets across various metrics. \
                 The average depth of target is {} yards. \
                 They complete {}% of short passes (<10 yards), \
                 {}% of intermediate passes (10-20 yards), and \
                 {}% of long passes (>20 yards). \
                 When rushing, they average {} yards per attempt \
                 with {}% of rushes resulting in touchdowns. \
                 This group offers a mix of pocket passers and mobile quarterbacks, \
                 providing offensive coordinators with various options to exploit \
                 defensive weaknesses.",
                request.population,
                avg1(MetricKey::AvgDepthOfTarget),
                avg1(MetricKey::ShortCompletionPct),
                avg1(MetricKey::IntermediateCompletionPct),
                avg1(MetricKey::LongCompletionPct),
                avg1(MetricKey::RushYardsPerAttempt),
                avg1(MetricKey::RushTdPct),
            ),
            Position::Wr => format!(
                "This group of {} players shows diverse skill sets across various metrics. \
                 The average man separation is {}, \
                 while the average zone separation is {}. \
                 They demonstrate an average catch rate of {}% \
                 and generate {} yards per route run. \
                 On average, they command a {}% target share \
                 and see {} red zone targets per season. \
                 This group offers a mix of specialists and well-rounded players, \
                 providing offensive coordinators with various options to exploit \
                 defensive weaknesses.",
                request.population,
                avg2(MetricKey::ManSeparation),
                avg2(MetricKey::ZoneSeparation),
                avg1(MetricKey::CatchRate),
                avg2(MetricKey::YardsPerRoute),
                avg1(MetricKey::TargetShare),
                avg1(MetricKey::RedZoneTargets),
            ),
        }
    }

    fn player_description(&self, request: &DescriptionRequest, name: &str) -> String {
        let value = |metric| request.player_value(metric);
        let above = |metric, threshold: f64| value(metric).is_some_and(|v| v > threshold);

        match request.position {
            Position::Qb => {
                if above(MetricKey::AvgDepthOfTarget, 8.5)
                    && above(MetricKey::LongCompletionPct, 40.0)
                {
                    format!(
                        "{name} is a deep ball specialist with excellent arm strength. \
                         This quarterback excels at pushing the ball downfield, averaging \
                         {:.1} yards per target with a {:.1}% completion rate on deep \
                         passes. He would thrive in a vertical passing offense that \
                         emphasizes play-action and shot plays.",
                        value(MetricKey::AvgDepthOfTarget).unwrap_or_default(),
                        value(MetricKey::LongCompletionPct).unwrap_or_default(),
                    )
                } else if above(MetricKey::ShortCompletionPct, 80.0) {
                    format!(
                        "{name} is a precision passer who excels in the short game. With a \
                         {:.1}% completion rate on short passes, this quarterback would be \
                         ideal in a West Coast offense that emphasizes timing, rhythm, and \
                         accuracy. His ability to consistently move the chains makes him \
                         valuable for sustaining drives.",
                        value(MetricKey::ShortCompletionPct).unwrap_or_default(),
                    )
                } else if above(MetricKey::RushYardsPerAttempt, 6.0)
                    && above(MetricKey::RushTdPct, 8.0)
                {
                    format!(
                        "{name} is a dynamic dual-threat quarterback with exceptional \
                         rushing ability. Averaging {:.1} yards per rush attempt with a \
                         {:.1}% touchdown rate on rushes, he adds a crucial dimension to \
                         his offense. This quarterback would excel in an offense that \
                         utilizes designed runs and RPOs to take advantage of his \
                         athleticism.",
                        value(MetricKey::RushYardsPerAttempt).unwrap_or_default(),
                        value(MetricKey::RushTdPct).unwrap_or_default(),
                    )
                } else if above(MetricKey::IntermediateCompletionPct, 65.0) {
                    format!(
                        "{name} excels at intermediate throws, completing {:.1}% of passes \
                         between 10-20 yards. This quarterback has excellent anticipation \
                         and timing, allowing him to hit tight windows in the middle of \
                         the field. He would be most effective in an offense that \
                         emphasizes seam routes and crossing patterns.",
                        value(MetricKey::IntermediateCompletionPct).unwrap_or_default(),
                    )
                } else {
                    format!(
                        "{name} shows balanced performance across multiple metrics without \
                         a single standout trait. This quarterback would be effective in a \
                         balanced offense that mixes short, intermediate, and deep passes. \
                         His versatility allows him to adapt to different game situations \
                         and defensive looks."
                    )
                }
            }
            Position::Wr => {
                if above(MetricKey::ManSeparation, 0.3) && above(MetricKey::ZoneSeparation, 0.25) {
                    format!(
                        "{name} is an elite route runner who creates separation against \
                         both man and zone coverage. This player would excel as a primary \
                         X receiver who can be moved around the formation to create \
                         mismatches. His ability to get open against any coverage type \
                         makes him a quarterback's best friend and a true #1 option."
                    )
                } else if above(MetricKey::ManSeparation, 0.3) {
                    format!(
                        "{name} specializes in beating man coverage with excellent release \
                         techniques and route running. This player would be most effective \
                         as an outside receiver who can win one-on-one matchups against \
                         cornerbacks. He would thrive in an offense that faces a lot of \
                         man coverage or in crucial third-down situations."
                    )
                } else if above(MetricKey::ZoneSeparation, 0.25) {
                    format!(
                        "{name} excels at finding soft spots in zone coverage with great \
                         spatial awareness. This player would be ideal as a slot receiver \
                         or in a West Coast offense that emphasizes quick timing routes. \
                         His ability to read defenses and settle in open areas makes him \
                         valuable for sustaining drives."
                    )
                } else if above(MetricKey::CatchRate, 70.0) {
                    format!(
                        "{name} has exceptional hands and reliability as a pass catcher. \
                         This player would be perfect as a possession receiver who can be \
                         counted on in critical situations. His consistency makes him \
                         valuable on third downs and in the red zone where reliability is \
                         paramount."
                    )
                } else if above(MetricKey::YardsPerRoute, 2.5) {
                    format!(
                        "{name} generates significant production per route run, indicating \
                         big-play ability. This player would excel as a deep threat who \
                         can stretch defenses vertically. His efficiency makes him \
                         valuable in an offense that wants to create explosive plays \
                         downfield."
                    )
                } else if above(MetricKey::RedZoneTargets, 20.0) {
                    format!(
                        "{name} is heavily targeted in the red zone, suggesting strong \
                         contested catch ability. This player would be most effective as a \
                         red zone specialist who can win jump balls and tight-window \
                         throws near the goal line. His scoring potential makes him \
                         valuable for teams struggling to convert red zone opportunities \
                         into touchdowns."
                    )
                } else {
                    format!(
                        "{name} shows balanced performance across multiple metrics without \
                         a single standout trait. This player would be effective as a \
                         complementary receiver who can fill multiple roles within an \
                         offense. His versatility allows him to adapt to different game \
                         situations and coverage looks."
                    )
                }
            }
        }
    }
}

fn fmt_avg(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "N/A".to_string(),
    }
}

#[async_trait]
impl DescriptionBackend for TemplateBackend {
    fn name(&self) -> &'static str {
        "template"
    }

    async fn describe(&self, request: &DescriptionRequest) -> Result<String, NarrativeError> {
        Ok(match &request.player {
            Some(context) => self.player_description(request, &context.name),
            None => self.group_summary(request),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerRecord, Position};

    fn describe(request: &DescriptionRequest) -> String {
        let backend = TemplateBackend::new();
        tokio_test::block_on(backend.describe(request)).unwrap()
    }

    fn deep_ball_qb() -> PlayerRecord {
        PlayerRecord::new("Vertical Vince", "DEN", Position::Qb)
            .with_metric(MetricKey::AvgDepthOfTarget, 9.2)
            .with_metric(MetricKey::LongCompletionPct, 44.0)
            .with_metric(MetricKey::ShortCompletionPct, 70.0)
    }

    #[test]
    fn test_deep_ball_specialist_text() {
        let players = vec![deep_ball_qb()];
        let request = DescriptionRequest::for_player(&players, &players[0].id).unwrap();
        let text = describe(&request);
        assert!(text.contains("Vertical Vince"));
        assert!(text.contains("deep ball specialist"));
        assert!(text.contains("9.2"));
    }

    #[test]
    fn test_short_game_beats_lower_branches() {
        let players = vec![PlayerRecord::new("Checkdown Charlie", "NE", Position::Qb)
            .with_metric(MetricKey::ShortCompletionPct, 84.0)
            .with_metric(MetricKey::IntermediateCompletionPct, 70.0)];
        let request = DescriptionRequest::for_player(&players, &players[0].id).unwrap();
        let text = describe(&request);
        assert!(text.contains("precision passer"));
        assert!(!text.contains("intermediate throws"));
    }

    #[test]
    fn test_balanced_qb_fallback_text() {
        let players = vec![PlayerRecord::new("Average Andy", "JAX", Position::Qb)
            .with_metric(MetricKey::ShortCompletionPct, 60.0)];
        let request = DescriptionRequest::for_player(&players, &players[0].id).unwrap();
        let text = describe(&request);
        assert!(text.contains("balanced performance"));
    }

    #[test]
    fn test_elite_separator_requires_both_thresholds() {
        let players = vec![PlayerRecord::new("Open Owen", "CIN", Position::Wr)
            .with_metric(MetricKey::ManSeparation, 0.35)
            .with_metric(MetricKey::ZoneSeparation, 0.30)];
        let request = DescriptionRequest::for_player(&players, &players[0].id).unwrap();
        assert!(describe(&request).contains("elite route runner"));

        let players = vec![PlayerRecord::new("Man Mel", "NYJ", Position::Wr)
            .with_metric(MetricKey::ManSeparation, 0.35)
            .with_metric(MetricKey::ZoneSeparation, 0.10)];
        let request = DescriptionRequest::for_player(&players, &players[0].id).unwrap();
        assert!(describe(&request).contains("beating man coverage"));
    }

    #[test]
    fn test_missing_metric_never_trips_a_threshold() {
        let players = vec![PlayerRecord::new("Sparse Sam", "FA", Position::Wr)];
        let request = DescriptionRequest::for_player(&players, &players[0].id).unwrap();
        assert!(describe(&request).contains("balanced performance"));
    }

    #[test]
    fn test_qb_group_summary() {
        let players = vec![
            deep_ball_qb(),
            PlayerRecord::new("Backup Bob", "DEN", Position::Qb)
                .with_metric(MetricKey::AvgDepthOfTarget, 6.8),
        ];
        let request = DescriptionRequest::for_population(Position::Qb, &players);
        let text = describe(&request);
        assert!(text.contains("This group of 2 quarterbacks"));
        assert!(text.contains("8.0 yards")); // mean of 9.2 and 6.8
    }

    #[test]
    fn test_group_summary_missing_average_renders_na() {
        let players = vec![PlayerRecord::new("Sparse Sam", "FA", Position::Wr)];
        let request = DescriptionRequest::for_population(Position::Wr, &players);
        let text = describe(&request);
        assert!(text.contains("N/A"));
    }
}
