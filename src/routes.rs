use crate::{
    api::{employee, timesheet},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-scope limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    cfg.service(
        web::scope("/employees")
            .wrap(build_limiter(config.rate_limit_per_min))
            .service(
                web::resource("")
                    .route(web::get().to(employee::list_employees))
                    .route(web::post().to(employee::create_employee)),
            )
            // Registered before /{id} so "options" is not read as an id
            .service(web::resource("/options").route(web::get().to(employee::employee_options)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(employee::get_employee))
                    .route(web::put().to(employee::update_employee))
                    .route(web::delete().to(employee::delete_employee)),
            ),
    );

    cfg.service(
        web::scope("/timesheets")
            .wrap(build_limiter(config.rate_limit_per_min))
            .service(
                web::resource("")
                    .route(web::get().to(timesheet::list_timesheets))
                    .route(web::post().to(timesheet::create_timesheet)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(timesheet::get_timesheet))
                    .route(web::put().to(timesheet::update_timesheet))
                    .route(web::delete().to(timesheet::delete_timesheet)),
            ),
    );
}
