use super::*;

#[test]
fn parses_hours_with_multiple_ids() {
    let cli = Cli::try_parse_from(["placemap", "hours", "11", "22"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Hours { ref ids, html: None } if ids == &["11", "22"]
    ));
}

#[test]
fn hours_requires_an_id() {
    assert!(Cli::try_parse_from(["placemap", "hours"]).is_err());
}

#[test]
fn parses_hours_from_saved_page() {
    let cli = Cli::try_parse_from(["placemap", "hours", "11", "--html", "page.html"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Hours { html: Some(ref p), .. } if p == &PathBuf::from("page.html")
    ));
}

#[test]
fn menu_profile_defaults_to_plain() {
    let cli = Cli::try_parse_from(["placemap", "menu", "11"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Menu {
            profile: ProfileArg::Plain,
            ..
        }
    ));
}

#[test]
fn parses_unescaped_menu_profile() {
    let cli = Cli::try_parse_from(["placemap", "menu", "11", "--profile", "unescaped"])
        .expect("expected valid cli args");

    let Commands::Menu { profile, .. } = cli.command else {
        panic!("expected menu command");
    };
    assert_eq!(DecodeProfile::from(profile), DecodeProfile::Unescaped);
}

#[test]
fn rejects_unknown_menu_profile() {
    assert!(Cli::try_parse_from(["placemap", "menu", "11", "--profile", "latin1"]).is_err());
}

#[test]
fn parses_place_command() {
    let cli = Cli::try_parse_from(["placemap", "place", "33"]).expect("expected valid cli args");

    assert!(matches!(cli.command, Commands::Place { ref ids, .. } if ids == &["33"]));
}

#[test]
fn parses_booking_menu_with_default_source() {
    let cli = Cli::try_parse_from([
        "placemap",
        "booking-menu",
        "--place-id",
        "1",
        "--booking-id",
        "2",
        "--item-id",
        "3",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::BookingMenu {
            ref place_id,
            ref booking_id,
            ref item_id,
            source: MenuSource::Menu,
        } if place_id == "1" && booking_id == "2" && item_id == "3"
    ));
}

#[test]
fn parses_booking_menu_groups_source() {
    let cli = Cli::try_parse_from([
        "placemap",
        "booking-menu",
        "--place-id",
        "1",
        "--booking-id",
        "2",
        "--item-id",
        "3",
        "--source",
        "menu-groups",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::BookingMenu {
            source: MenuSource::MenuGroups,
            ..
        }
    ));
}

#[test]
fn booking_menu_requires_item_id() {
    let result = Cli::try_parse_from([
        "placemap",
        "booking-menu",
        "--place-id",
        "1",
        "--booking-id",
        "2",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_search_with_negative_longitude() {
    let cli = Cli::try_parse_from([
        "placemap", "search", "--query", "국밥", "--lat", "37.5", "--lng", "-0.12",
    ])
    .expect("expected valid cli args");

    let Commands::Search { query, lat, lng } = cli.command else {
        panic!("expected search command");
    };
    assert_eq!(query, "국밥");
    assert!((lat - 37.5).abs() < f64::EPSILON);
    assert!((lng + 0.12).abs() < f64::EPSILON);
}

#[test]
fn parses_classify_categories() {
    let cli = Cli::try_parse_from(["placemap", "classify", "카페,디저트", "한식>국밥"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Classify { ref categories } if categories == &["카페,디저트", "한식>국밥"]
    ));
}

#[test]
fn no_command_is_an_error() {
    assert!(Cli::try_parse_from(["placemap"]).is_err());
}

#[test]
fn client_build_failure_keeps_scraper_error_as_source() {
    let config = AppConfig {
        env: placemap_core::Environment::Test,
        log_level: "info".to_string(),
        place_base_url: "http://127.0.0.1:9".to_string(),
        booking_base_url: "http://127.0.0.1:9".to_string(),
        search_base_url: "http://127.0.0.1:9".to_string(),
        category_groups_path: PathBuf::from("config/category_groups.yaml"),
        scraper_request_timeout_secs: 5,
        scraper_user_agent: "bad\nagent".to_string(),
        scraper_max_concurrent: 1,
        scraper_inter_request_delay_ms: 0,
        scraper_max_retries: 0,
        scraper_retry_backoff_base_secs: 0,
    };

    let Err(err) = build_client(&config) else {
        panic!("expected client build to fail for a newline in the user agent");
    };
    assert_eq!(err.to_string(), "failed to build place client");
    assert!(err
        .chain()
        .nth(1)
        .is_some_and(|source| source.downcast_ref::<placemap_scraper::ScraperError>().is_some()));
}
