use tera::Tera;

lazy_static::lazy_static! {
    pub static ref TEMPLATES: Tera = {
        let mut tera = Tera::default();
        if let Err(e) = tera.add_raw_template("jobs.html", include_str!("../templates/jobs.html")) {
            tracing::error!("Template parsing error: {}", e);
            std::process::exit(1);
        }
        tera
    };
}
