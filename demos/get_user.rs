use osu_api::{Config, EndpointId, GameMode, GetUserEndpoint, GetUserRequest, OsuApi};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional: enable basic logging for the example
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    // Expects {"client_id": ..., "client_secret": "..."} next to the binary
    let cfg = Config::from_file("config.json")?;
    let api = OsuApi::new(&cfg)?;
    api.register_endpoint(EndpointId::GetUser).await?;

    let user = api
        .request::<GetUserEndpoint>(GetUserRequest::by_username("peppy").with_mode(GameMode::Osu))
        .await?;
    println!("{} ({:?})", user.username, user.country_code);
    if let Some(stats) = user.statistics {
        println!("pp: {:?} global rank: {:?}", stats.performance_points, stats.global_rank);
    }
    Ok(())
}
