use std::path::PathBuf;

use godockerize_build::dockerfile::DockerfileGenerator;
use godockerize_build::staging::StagingDir;
use godockerize_core::{BuildConfig, PackageSpec, UserSpec};

fn package(import_path: &str) -> PackageSpec {
    PackageSpec {
        import_path: import_path.to_owned(),
        dir: PathBuf::from("/src"),
        go_files: vec![],
    }
}

fn default_packages() -> Vec<PackageSpec> {
    vec![
        package("example.com/app/cmd/server"),
        package("example.com/app/cmd/worker"),
    ]
}

fn render(config: &BuildConfig) -> Vec<String> {
    let packages = default_packages();
    DockerfileGenerator::new(config, &packages, "alpine:3.6")
        .render()
        .lines()
        .to_vec()
}

const EDGE_LINE: &str = r#"RUN echo -e "@edge http://dl-cdn.alpinelinux.org/alpine/edge/main\n@edge http://dl-cdn.alpinelinux.org/alpine/edge/community" >> /etc/apk/repositories"#;

// ── Dockerfile Generation Tests ──

#[test]
fn dockerfile_without_directives() {
    let lines = render(&BuildConfig::default());

    assert_eq!(
        lines,
        vec![
            "FROM alpine:3.6",
            "RUN apk add --no-cache ca-certificates mailcap tini",
            r#"ENTRYPOINT ["/sbin/tini", "--", "/usr/local/bin/server"]"#,
            "ADD server /usr/local/bin/",
            "ADD worker /usr/local/bin/",
        ]
    );
}

#[test]
fn dockerfile_uses_configured_base() {
    let config = BuildConfig::default();
    let packages = default_packages();
    let output = DockerfileGenerator::new(&config, &packages, "alpine:3.19").render();

    assert_eq!(output.lines()[0], "FROM alpine:3.19");
}

#[test]
fn dockerfile_full_layer_order() {
    let mut config = BuildConfig::seeded(["PORT=8080"]);
    config.install.insert("git".to_owned());
    config.run.push("mkdir /srv".to_owned());
    config.run.push("touch /srv/ready".to_owned());
    config.expose.insert("8080".to_owned());
    config.user = Some(UserSpec {
        name: "app".to_owned(),
        dirs: vec!["/srv".to_owned(), "/data".to_owned()],
    });

    assert_eq!(
        render(&config),
        vec![
            "FROM alpine:3.6",
            "RUN apk add --no-cache ca-certificates git mailcap tini",
            "RUN mkdir /srv",
            "RUN touch /srv/ready",
            "ENV PORT=8080",
            "EXPOSE 8080",
            "RUN addgroup -S app && adduser -S -G app -h /home/app app",
            "RUN mkdir -p /srv && chown -R app:app /srv",
            "RUN mkdir -p /data && chown -R app:app /data",
            "USER app",
            r#"ENTRYPOINT ["/sbin/tini", "--", "/usr/local/bin/server"]"#,
            "ADD server /usr/local/bin/",
            "ADD worker /usr/local/bin/",
        ]
    );
}

#[test]
fn dockerfile_sorts_set_tokens() {
    let mut config = BuildConfig::seeded(["Z=1", "A=1", "M=1"]);
    config.expose.extend(["9000".to_owned(), "443".to_owned(), "80".to_owned()]);
    let lines = render(&config);

    assert!(lines.contains(&"ENV A=1 M=1 Z=1".to_owned()));
    assert!(lines.contains(&"EXPOSE 443 80 9000".to_owned()));
}

#[test]
fn dockerfile_keeps_duplicate_run_commands() {
    let mut config = BuildConfig::default();
    config.run.extend(["echo a".to_owned(), "echo a".to_owned()]);
    let lines = render(&config);

    let runs = lines.iter().filter(|l| *l == "RUN echo a").count();
    assert_eq!(runs, 2);
}

#[test]
fn dockerfile_no_env_or_expose_when_empty() {
    let lines = render(&BuildConfig::default());

    assert!(!lines.iter().any(|l| l.starts_with("ENV ")));
    assert!(!lines.iter().any(|l| l.starts_with("EXPOSE ")));
    assert!(!lines.iter().any(|l| l.starts_with("USER ")));
}

#[test]
fn dockerfile_user_without_dirs() {
    let mut config = BuildConfig::default();
    config.user = Some(UserSpec {
        name: "svc".to_owned(),
        dirs: vec![],
    });
    let lines = render(&config);

    let user_at = lines.iter().position(|l| l == "USER svc").unwrap();
    assert_eq!(
        lines[user_at - 1],
        "RUN addgroup -S svc && adduser -S -G svc -h /home/svc svc"
    );
}

// ── Edge repository Tests ──

#[test]
fn dockerfile_edge_package_registers_repository_once() {
    let mut config = BuildConfig::default();
    config.install.extend([
        "a@edge".to_owned(),
        "b@edge".to_owned(),
        "c@edge".to_owned(),
    ]);
    let lines = render(&config);

    let edge: Vec<_> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| *l == EDGE_LINE)
        .collect();
    assert_eq!(edge.len(), 1);

    let (edge_at, _) = edge[0];
    assert!(lines[edge_at + 1].starts_with("RUN apk add --no-cache a@edge b@edge c@edge"));
    assert_eq!(edge_at, 1);
}

#[test]
fn dockerfile_no_edge_repository_without_edge_packages() {
    let mut config = BuildConfig::default();
    config.install.insert("edge".to_owned());
    config.install.insert("pkg@edgy".to_owned());

    assert!(!render(&config).contains(&EDGE_LINE.to_owned()));
}

// ── Output format Tests ──

#[test]
fn dockerfile_text_is_newline_terminated() {
    let config = BuildConfig::default();
    let packages = vec![package("hello")];
    let text = DockerfileGenerator::new(&config, &packages, "alpine:3.6")
        .render()
        .to_dockerfile();

    assert_eq!(
        text,
        "FROM alpine:3.6\n\
         RUN apk add --no-cache ca-certificates mailcap tini\n\
         ENTRYPOINT [\"/sbin/tini\", \"--\", \"/usr/local/bin/hello\"]\n\
         ADD hello /usr/local/bin/\n"
    );
}

#[test]
fn display_indents_each_line() {
    let config = BuildConfig::default();
    let packages = vec![package("hello")];
    let shown = DockerfileGenerator::new(&config, &packages, "alpine:3.6")
        .render()
        .to_string();

    assert!(shown.lines().all(|l| l.starts_with("  ")));
    assert!(shown.starts_with("  FROM alpine:3.6\n"));
}

#[test]
fn render_is_deterministic() {
    let mut config = BuildConfig::seeded(["B=1", "A=2"]);
    config.install.insert("curl@edge".to_owned());
    config.run.push("true".to_owned());
    let packages = default_packages();
    let generator = DockerfileGenerator::new(&config, &packages, "alpine:3.6");

    assert_eq!(generator.render().to_dockerfile(), generator.render().to_dockerfile());
}

mod proptests {
    use super::*;
    use godockerize_core::Directive;
    use godockerize_core::SourceDirective;
    use proptest::prelude::*;

    fn token() -> impl Strategy<Value = String> {
        "[a-z0-9=_-]{1,6}"
    }

    fn config_from(env: &[String]) -> BuildConfig {
        let mut config = BuildConfig::default();
        for (i, t) in env.iter().enumerate() {
            config
                .apply(SourceDirective {
                    directive: Directive::Env(vec![t.clone()]),
                    path: PathBuf::from("main.go"),
                    line: i + 1,
                    column: 1,
                })
                .unwrap();
        }
        config
    }

    proptest! {
        #[test]
        fn env_line_is_sorted_and_deduplicated(
            tokens in proptest::collection::vec(token(), 1..10),
        ) {
            let mut shuffled = tokens.clone();
            shuffled.reverse();
            shuffled.extend(tokens.iter().cloned());

            let a = render(&config_from(&tokens));
            let b = render(&config_from(&shuffled));
            prop_assert_eq!(&a, &b);

            let env = a.iter().find(|l| l.starts_with("ENV ")).unwrap();
            let listed: Vec<&str> = env["ENV ".len()..].split(' ').collect();
            let mut expected: Vec<&str> = tokens.iter().map(String::as_str).collect();
            expected.sort();
            expected.dedup();
            prop_assert_eq!(listed, expected);
        }
    }
}

// ── Staging Tests ──

#[test]
fn staging_writes_dockerfile() {
    let config = BuildConfig::default();
    let packages = vec![package("hello")];
    let definition = DockerfileGenerator::new(&config, &packages, "alpine:3.6").render();

    let staging = StagingDir::create().unwrap();
    let path = staging.write_dockerfile(&definition).unwrap();

    assert_eq!(path, staging.path().join("Dockerfile"));
    let written = std::fs::read_to_string(path).unwrap();
    assert_eq!(written, definition.to_dockerfile());
}

#[test]
fn staging_binary_path_is_inside_directory() {
    let staging = StagingDir::create().unwrap();
    assert_eq!(staging.binary_path("server"), staging.path().join("server"));
}

#[test]
fn staging_is_removed_on_drop() {
    let staging = StagingDir::create().unwrap();
    let dir = staging.path().to_path_buf();
    std::fs::write(staging.binary_path("server"), b"\x7fELF").unwrap();
    assert!(dir.exists());

    drop(staging);

    assert!(!dir.exists());
}

#[test]
fn staging_directory_name_has_prefix() {
    let staging = StagingDir::create().unwrap();
    let name = staging.path().file_name().unwrap().to_string_lossy();
    assert!(name.starts_with("godockerize"), "got: {name}");
}
