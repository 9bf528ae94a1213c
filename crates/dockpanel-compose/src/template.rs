//! Built-in starter stacks.
//!
//! Templates go through the same pipeline as imported text before they
//! are presented, so every template must pass strict validation.

use std::fmt;
use std::str::FromStr;

use dockpanel_common::error::DockpanelError;
use serde::{Deserialize, Serialize};

/// A built-in compose template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Template {
    /// PHP, Node, `MySQL`, phpMyAdmin and Traefik behind one network.
    WebApp,
    /// Jupyter, Postgres and Metabase.
    DataScience,
    /// A single nginx service with one volume and one network.
    Minimal,
}

impl Template {
    /// Every template, in catalog order.
    pub const ALL: [Self; 3] = [Self::WebApp, Self::DataScience, Self::Minimal];

    /// Catalog identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::WebApp => "web-app",
            Self::DataScience => "data-science",
            Self::Minimal => "minimal",
        }
    }

    /// One-line description for pickers.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::WebApp => "Multi-service web stack with a reverse proxy",
            Self::DataScience => "Notebook, database and dashboard for data analysis",
            Self::Minimal => "Single nginx service",
        }
    }

    /// YAML source of the template.
    #[must_use]
    pub const fn source(self) -> &'static str {
        match self {
            Self::WebApp => WEB_APP,
            Self::DataScience => DATA_SCIENCE,
            Self::Minimal => MINIMAL,
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Template {
    type Err = DockpanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "web-app" | "webApp" | "web" => Ok(Self::WebApp),
            "data-science" | "dataScience" | "data" => Ok(Self::DataScience),
            "minimal" => Ok(Self::Minimal),
            other => Err(DockpanelError::NotFound {
                kind: "template",
                id: other.to_owned(),
            }),
        }
    }
}

const WEB_APP: &str = r#"version: '3'

services:
  apache:
    image: php:8.2-apache
    volumes:
      - ./src:/var/www/html
    labels:
      - traefik.enable=true
      - traefik.http.routers.apache.rule=Host(`app.localhost`)

  node:
    image: node:latest
    working_dir: /app
    volumes:
      - ./app:/app
    command: npm run dev

  mysql:
    image: mysql:8.0
    environment:
      MYSQL_ROOT_PASSWORD: root
      MYSQL_DATABASE: app
    volumes:
      - mysql_data:/var/lib/mysql

  phpmyadmin:
    image: phpmyadmin/phpmyadmin
    environment:
      PMA_HOST: mysql
    labels:
      - traefik.enable=true
      - traefik.http.routers.pma.rule=Host(`pma.localhost`)

  traefik:
    image: traefik:v2.10
    command:
      - --api.insecure=true
      - --providers.docker=true
    ports:
      - "80:80"
      - "8080:8080"
    volumes:
      - /var/run/docker.sock:/var/run/docker.sock

volumes:
  mysql_data:
    driver: local

networks:
  default:
    name: web
    driver: bridge
"#;

const DATA_SCIENCE: &str = r#"version: '3'

services:
  jupyter:
    image: jupyter/datascience-notebook
    ports:
      - "8888:8888"
    volumes:
      - jupyter_data:/home/jovyan/work
    environment:
      JUPYTER_ENABLE_LAB: 'yes'

  postgres:
    image: postgres:15
    environment:
      POSTGRES_PASSWORD: postgres
      POSTGRES_DB: data
    volumes:
      - postgres_data:/var/lib/postgresql/data

  metabase:
    image: metabase/metabase
    ports:
      - "3000:3000"
    environment:
      MB_DB_TYPE: postgres
      MB_DB_DBNAME: data
      MB_DB_PORT: 5432
      MB_DB_USER: postgres
      MB_DB_PASS: postgres
      MB_DB_HOST: postgres
    depends_on:
      - postgres

volumes:
  jupyter_data:
    driver: local
  postgres_data:
    driver: local

networks:
  analytics:
    driver: bridge
"#;

const MINIMAL: &str = r#"version: '3'

services:
  app:
    image: nginx:alpine
    volumes:
      - app_data:/usr/share/nginx/html
    ports:
      - "8080:80"
    networks:
      - web

volumes:
  app_data:
    driver: local

networks:
  web:
    driver: bridge
"#;
