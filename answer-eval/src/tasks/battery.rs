//! Built-in battery for the Project Nova brief

use super::{numbered, TestCase};

/// The 25-question battery: 21 answerable questions followed by 4 that the
/// brief does not cover.
pub fn standard_battery() -> Vec<TestCase> {
    numbered(vec![
        // Basic info
        TestCase::expect_any_group("Who is the project lead?", vec![vec!["evelyn reed"], vec!["dr reed"]]),
        TestCase::expect_any_group("What is the project start date?", vec![vec!["august 1 2025"]]),
        TestCase::expect_any_group("What is the go-live target date?", vec![vec!["december 1 2025"]]),
        TestCase::expect_any_group("What is the backend codename?", vec![vec!["orion"]]),
        // Team
        TestCase::expect_any_group("Who is the DevOps engineer?", vec![vec!["marcus thorne"], vec!["thorne"]]),
        TestCase::expect_any_group("Who is the Chief Designer?", vec![vec!["sarah jenkins"], vec!["jenkins"]]),
        TestCase::expect_any_group("Who is the lead for Orion?", vec![vec!["david chen"], vec!["chen"]]),
        // Technology
        TestCase::expect_all("What database is used?", ["postgresql"]),
        TestCase::expect_all("What frontend framework is used?", ["react"]),
        TestCase::expect_all("What cloud provider is used?", ["aws"]),
        // Budget and risks
        TestCase::expect_any_group("What is the total budget?", vec![vec!["1.2 million"], vec!["$1.2m"]]),
        TestCase::expect_any_group(
            "How much is allocated for development?",
            vec![vec!["800000"], vec!["$800k"], vec!["$800,000"], vec!["800,000"]],
        ),
        TestCase::expect_all("What is the mitigation for scaling risks?", ["auto", "scaling"]),
        TestCase::expect_any_group("What handles API rate limits?", vec![vec!["redis"], vec!["cache"]]),
        // Security, vendors, communications
        TestCase::expect_all("What encryption standard is required?", ["aes", "256"]),
        TestCase::expect_any_group("How long must audit logs be retained?", vec![vec!["7 years"], vec!["seven years"]]),
        TestCase::expect_all("Who is the security auditing firm?", ["cyberguard"]),
        TestCase::expect_any_group("When is the daily standup?", vec![vec!["9:30 am"], vec!["930 am"]]),
        TestCase::expect_any_group("Who is the emergency contact?", vec![vec!["marcus thorne"], vec!["thorne"]]),
        // People outside the core team
        TestCase::expect_any_group("What is the CEO's name?", vec![vec!["eleanor vance"], vec!["vance"]]),
        TestCase::expect_any_group("Who is the HR manager?", vec![vec!["sarah miller"], vec!["miller"]]),
        // Not covered by the brief
        TestCase::expect_abstain("Is the project ahead of schedule?"),
        TestCase::expect_abstain("What is the price of the stock?"),
        TestCase::expect_abstain("What is the color of the new logo?"),
        TestCase::expect_abstain("What is the lunch menu for Friday?"),
    ])
}
