#![allow(dead_code)]

use std::path::Path;
use tempfile::TempDir;

/// A registry checkout on disk: `registry/` plus the shared `.icons/` dir.
pub struct Registry {
    dir: TempDir,
}

impl Registry {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("registry")).unwrap();
        std::fs::create_dir_all(dir.path().join(".icons")).unwrap();
        Registry { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    pub fn mkdir(&self, rel: &str) {
        std::fs::create_dir_all(self.root().join(rel)).unwrap();
    }

    pub fn remove(&self, rel: &str) {
        let path = self.root().join(rel);
        if path.is_dir() {
            std::fs::remove_dir_all(path).unwrap();
        } else {
            std::fs::remove_file(path).unwrap();
        }
    }

    pub fn contributor(&self, namespace: &str, readme: &str) {
        self.write(&format!("registry/{namespace}/README.md"), readme);
    }

    /// Writes the module README and `main.tf`, plus `.icons/<name>.svg` so
    /// the fixture icon resolves.
    pub fn module(&self, namespace: &str, name: &str, readme: &str) {
        let dir = format!("registry/{namespace}/modules/{name}");
        self.write(&format!("{dir}/README.md"), readme);
        self.write(&format!("{dir}/main.tf"), "terraform {}\n");
        self.write(&format!(".icons/{name}.svg"), "<svg/>");
    }

    pub fn template(&self, namespace: &str, name: &str, readme: &str) {
        let dir = format!("registry/{namespace}/templates/{name}");
        self.write(&format!("{dir}/README.md"), readme);
        self.write(&format!("{dir}/main.tf"), "terraform {}\n");
        self.write(&format!(".icons/{name}.svg"), "<svg/>");
    }

    /// One valid contributor, module and template in namespace `acme`.
    pub fn populated() -> Self {
        let registry = Registry::new();
        registry.contributor("acme", &contributor_readme("acme"));
        registry.module("acme", "widget", &module_readme("acme", "widget"));
        registry.template("acme", "docker-box", &template_readme("acme", "docker-box"));
        registry
    }
}

pub fn contributor_readme(github: &str) -> String {
    format!(
        "---\ndisplay_name: Acme Corp\nbio: Tools for remote development\ngithub: {github}\nwebsite: https://acme.example.com\nsupport_email: support@acme.example.com\nstatus: community\n---\n\n# Acme Corp\n\nWe build developer tooling.\n"
    )
}

pub fn module_frontmatter(name: &str, extra: &str) -> String {
    format!(
        "---\ndisplay_name: Widget\ndescription: Installs the widget in a workspace\nicon: ../../../../.icons/{name}.svg\nverified: false\ntags: [helper, ide]\n{extra}---\n"
    )
}

pub fn usage_body(namespace: &str, name: &str) -> String {
    format!(
        "\n# Widget\n\nInstalls the widget in a workspace.\n\n```tf\nmodule \"{name}\" {{\n  source   = \"registry.coder.com/{namespace}/{name}/coder\"\n  version  = \"1.0.0\"\n  agent_id = coder_agent.example.id\n}}\n```\n\n## Extra\n\nMore docs.\n"
    )
}

pub fn module_readme(namespace: &str, name: &str) -> String {
    format!("{}{}", module_frontmatter(name, ""), usage_body(namespace, name))
}

pub fn module_readme_verified(namespace: &str, name: &str, verified: bool) -> String {
    module_readme(namespace, name).replace("verified: false", &format!("verified: {verified}"))
}

/// The five `## ` sections a template README documents itself in.
pub const TEMPLATE_SECTIONS: &str = r#"
## Prerequisites

- Docker 24.0 or later on the provisioner host
- Terraform 1.5 or later
- A Coder deployment whose provisioner can reach the Docker socket

## Infrastructure

This template provisions the following resources:

- One Docker container per workspace (2 CPU, 4GB RAM)
- One Docker volume for /home/coder (10GB)
- One Coder agent running inside the container

```mermaid
graph TD
    A[Coder workspace] --> B[Docker container]
    B --> C[Docker volume]
```

## Usage

1. Push the template with `coder templates push docker-box`.
2. Create a workspace from the dashboard.
3. Open the workspace in the browser.

```tf
terraform {
  required_providers {
    docker = {
      source = "kreuzwerker/docker"
    }
  }
}
```

## Cost and Permissions

Running the template has no cost beyond the Docker host itself.
The provisioner needs access to the Docker socket.
- Add the provisioner user to the docker group role.
- No cloud IAM policy is required.

## Variables

| Name | Type | Description | Default |
|------|------|-------------|---------|
| image | string | Container image | codercom/enterprise-base:ubuntu |
| cpu | number | CPU cores | 2 |
| memory | number | Memory in GB | 4 |
"#;

pub fn template_readme(namespace: &str, name: &str) -> String {
    format!(
        "---\ndisplay_name: Docker Box\ndescription: Develop inside a Docker container\nicon: ../../../../.icons/{name}.svg\nverified: false\ntags: [docker, container]\nplatform: docker\nworkload: development\nrequirements:\n  - Docker daemon\n---\n{}{TEMPLATE_SECTIONS}",
        usage_body(namespace, name)
    )
}
