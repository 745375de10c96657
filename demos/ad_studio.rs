use adstudio::state::View;
use adstudio::{AdAction, AdStudio, Driver, HttpGateway, StudioConfig};
use std::sync::Arc;

fn edit(field: &str, value: &str) -> AdAction {
    AdAction::EditCompany {
        field: field.to_string(),
        value: value.to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    adstudio::logger::init()?;
    if dotenv_loaded {
        log::info!(".env file loaded");
    } else {
        log::warn!("No .env file found");
    }

    let gateway = HttpGateway::new(StudioConfig::from_env())?;
    let mut studio: Driver<AdStudio> = Driver::new(Arc::new(gateway));

    studio.run(AdAction::LoadCompanies).await;
    studio.dispatch(AdAction::Navigate(View::Create));
    for (field, value) in [
        ("name", "Acme"),
        ("industry", "Retail"),
        ("product_service", "Running shoes"),
        ("target_audience", "Teens"),
        ("website", "https://acme.example"),
    ] {
        studio.dispatch(edit(field, value));
    }

    let state = studio.run(AdAction::SubmitCompany).await;
    if let Some(error) = &state.error {
        println!("Could not create company: {}", error.message);
        return Ok(());
    }
    let Some(company_id) = state.companies.items().last().map(|c| c.id.clone()) else {
        return Ok(());
    };

    studio.run(AdAction::SelectCompany(company_id)).await;
    let state = studio.run(AdAction::GenerateAd).await;

    for ad in state.ads.items() {
        println!(
            "{} {} ad -> {} ({} base64 chars)",
            ad.style,
            ad.ad_type,
            state.download_name(ad),
            ad.image_data.len()
        );
    }
    Ok(())
}
