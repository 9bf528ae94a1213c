//! Formatted output helpers for CLI commands.
//!
//! Renders compose summaries the way the dashboard shows them: images
//! split into name and tag, drivers with their custom network name.

use std::fmt::Write;

use dockpanel_compose::summary::ComposeSummary;

/// Splits an image reference into repository and tag.
///
/// A colon inside a registry host (`localhost:5000/app`) is not a tag.
#[must_use]
pub fn split_image(image: &str) -> (&str, Option<&str>) {
    match image.rsplit_once(':') {
        Some((name, tag)) if !tag.contains('/') && !name.is_empty() => (name, Some(tag)),
        _ => (image, None),
    }
}

/// Formats a driver label, appending the custom name when it differs.
#[must_use]
pub fn format_driver(driver: &str, custom_name: Option<&str>) -> String {
    match custom_name {
        Some(name) if name != driver => format!("{driver} driver ({name})"),
        _ => format!("{driver} driver"),
    }
}

/// Renders a summary as an indented listing.
#[must_use]
pub fn render_summary(summary: &ComposeSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Services ({})", summary.services.len());
    for service in &summary.services {
        let (name, tag) = split_image(&service.image);
        let image = tag.map_or_else(|| name.to_owned(), |t| format!("{name} @ {t}"));
        let _ = writeln!(out, "  {:<20} {image}", service.name);
        if !service.env_files.is_empty() {
            let _ = writeln!(out, "  {:<20} env: {}", "", service.env_files.join(", "));
        }
    }

    let _ = writeln!(out, "Volumes ({})", summary.volumes.len());
    for volume in &summary.volumes {
        let _ = writeln!(out, "  {:<20} {}", volume.name, format_driver(&volume.driver, None));
    }

    let _ = writeln!(out, "Networks ({})", summary.networks.len());
    for network in &summary.networks {
        let _ = writeln!(
            out,
            "  {:<20} {}",
            network.name,
            format_driver(&network.driver, network.custom_name.as_deref())
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use dockpanel_compose::summary::{NetworkEntry, ServiceEntry, VolumeEntry};

    use super::*;

    #[test]
    fn split_image_with_tag() {
        assert_eq!(split_image("nginx:latest"), ("nginx", Some("latest")));
    }

    #[test]
    fn split_image_without_tag() {
        assert_eq!(split_image("phpmyadmin/phpmyadmin"), ("phpmyadmin/phpmyadmin", None));
    }

    #[test]
    fn split_image_ignores_registry_port() {
        assert_eq!(split_image("localhost:5000/app"), ("localhost:5000/app", None));
    }

    #[test]
    fn format_driver_hides_matching_name() {
        assert_eq!(format_driver("bridge", Some("bridge")), "bridge driver");
        assert_eq!(format_driver("bridge", Some("web")), "bridge driver (web)");
    }

    #[test]
    fn render_summary_lists_all_sections() {
        let summary = ComposeSummary {
            services: vec![ServiceEntry {
                name: "web".into(),
                image: "nginx:alpine".into(),
                env_files: vec![".env".into()],
            }],
            volumes: vec![VolumeEntry {
                name: "data".into(),
                driver: "local".into(),
            }],
            networks: vec![NetworkEntry {
                name: "default".into(),
                driver: "bridge".into(),
                custom_name: Some("web".into()),
            }],
        };
        let text = render_summary(&summary);
        assert!(text.contains("Services (1)"));
        assert!(text.contains("nginx @ alpine"));
        assert!(text.contains("env: .env"));
        assert!(text.contains("local driver"));
        assert!(text.contains("bridge driver (web)"));
    }
}
