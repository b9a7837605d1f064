//! Catalog of project kinds, frameworks, and optional plugins.

use serde::Serialize;

/// Broad category chosen first in the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectKind {
    /// Browser application created by a framework's own scaffolding tool.
    Frontend,
    /// Server, library, CLI, or anything else written directly by `init`.
    Backend,
}

impl ProjectKind {
    /// Return all kinds in prompt order.
    pub(crate) fn all() -> [Self; 2] {
        [Self::Frontend, Self::Backend]
    }

    /// Label shown in the kind prompt.
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Backend => "Backend / Library / CLI / Other",
        }
    }

    /// Frameworks offered for this kind, in prompt order.
    pub(crate) fn frameworks(self) -> &'static [Framework] {
        match self {
            Self::Frontend => &[
                Framework::React,
                Framework::Vue,
                Framework::SvelteKit,
                Framework::NextJs,
                Framework::Nuxt3,
                Framework::SolidJs,
                Framework::Astro,
                Framework::Remix,
                Framework::Ember,
            ],
            Self::Backend => &[
                Framework::VanillaJs,
                Framework::VanillaTs,
                Framework::Express,
                Framework::Fastify,
                Framework::Koa,
                Framework::Hapi,
                Framework::NodeHttp,
            ],
        }
    }
}

/// Source language of the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Plain JavaScript.
    JavaScript,
    /// TypeScript, compiled with `tsc` or run through `tsx`.
    TypeScript,
}

impl Language {
    /// Whether this is TypeScript.
    pub(crate) fn is_typescript(self) -> bool {
        matches!(self, Self::TypeScript)
    }
}

/// A framework the scaffolder knows how to set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framework {
    /// React via create-react-app.
    React,
    /// Vue via create-vue.
    Vue,
    /// SvelteKit via the `sv` CLI.
    SvelteKit,
    /// Next.js via create-next-app.
    NextJs,
    /// Nuxt 3 via nuxi.
    Nuxt3,
    /// SolidJS via degit templates.
    SolidJs,
    /// Astro via create-astro.
    Astro,
    /// Remix via create-remix.
    Remix,
    /// Ember via ember-cli.
    Ember,
    /// Plain JavaScript with no framework.
    VanillaJs,
    /// Plain TypeScript with no framework.
    VanillaTs,
    /// Express HTTP server.
    Express,
    /// Fastify HTTP server.
    Fastify,
    /// Koa HTTP server.
    Koa,
    /// Hapi HTTP server.
    Hapi,
    /// Bare `node:http` server.
    NodeHttp,
}

/// An optional package offered alongside a backend framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Plugin {
    /// npm package name.
    pub package: &'static str,
    /// Identifier the starter file binds the import to.
    pub binding: &'static str,
    /// Starter-file lines that wire the plugin in.
    pub usage: &'static str,
    /// Type declarations package added for TypeScript projects.
    #[serde(skip)]
    pub types: Option<&'static str>,
}

/// Shorthand constructor for the plugin tables.
const fn plugin(
    package: &'static str,
    binding: &'static str,
    usage: &'static str,
    types: Option<&'static str>,
) -> Plugin {
    Plugin {
        package,
        binding,
        usage,
        types,
    }
}

/// Express middleware.
const EXPRESS_PLUGINS: &[Plugin] = &[
    plugin("cors", "cors", "app.use(cors());", Some("@types/cors")),
    plugin(
        "body-parser",
        "bodyParser",
        "app.use(bodyParser.json());\napp.use(bodyParser.urlencoded({ extended: true }));",
        Some("@types/body-parser"),
    ),
    plugin("morgan", "morgan", "app.use(morgan('dev'));", Some("@types/morgan")),
    plugin("helmet", "helmet", "app.use(helmet());", Some("@types/helmet")),
    plugin(
        "cookie-parser",
        "cookieParser",
        "app.use(cookieParser());",
        Some("@types/cookie-parser"),
    ),
];

/// Fastify plugins.
const FASTIFY_PLUGINS: &[Plugin] = &[
    plugin("@fastify/cors", "fastifyCors", "fastify.register(fastifyCors);", None),
    plugin(
        "@fastify/formbody",
        "fastifyFormbody",
        "fastify.register(fastifyFormbody);",
        None,
    ),
    plugin(
        "@fastify/helmet",
        "fastifyHelmet",
        "fastify.register(fastifyHelmet);",
        None,
    ),
    plugin(
        "@fastify/static",
        "fastifyStatic",
        "// fastify.register(fastifyStatic, { root: path.join(__dirname, 'public') });",
        None,
    ),
];

/// Koa middleware.
const KOA_PLUGINS: &[Plugin] = &[
    plugin("koa-cors", "koaCors", "app.use(koaCors());", Some("@types/koa-cors")),
    plugin(
        "koa-bodyparser",
        "koaBodyparser",
        "app.use(koaBodyparser());",
        Some("@types/koa-bodyparser"),
    ),
    plugin(
        "koa-logger",
        "koaLogger",
        "app.use(koaLogger());",
        Some("@types/koa-logger"),
    ),
    plugin(
        "koa-helmet",
        "koaHelmet",
        "app.use(koaHelmet());",
        Some("@types/koa-helmet"),
    ),
    plugin(
        "koa-cookie",
        "koaCookie",
        "app.use(koaCookie());",
        Some("@types/koa-cookie"),
    ),
];

/// Hapi plugins.
const HAPI_PLUGINS: &[Plugin] = &[
    plugin("@hapi/inert", "Inert", "server.register(Inert);", None),
    plugin("@hapi/vision", "Vision", "server.register(Vision);", None),
];

/// Helpers for a bare `node:http` server.
const NODE_HTTP_PLUGINS: &[Plugin] = &[
    plugin(
        "serve-static",
        "serveStatic",
        "// You can use serve-static with finalhandler for static files",
        Some("@types/serve-static"),
    ),
    plugin(
        "helmet",
        "helmet",
        "// You can use helmet with http server using helmet.contentSecurityPolicy() etc.",
        None,
    ),
    plugin(
        "cookie",
        "cookie",
        "// You can use cookie to parse cookies from req.headers.cookie",
        None,
    ),
];

impl Framework {
    /// Display name used in prompts and messages.
    pub(crate) fn display_name(self) -> &'static str {
        match self {
            Self::React => "React",
            Self::Vue => "Vue",
            Self::SvelteKit => "SvelteKit",
            Self::NextJs => "Next.js",
            Self::Nuxt3 => "Nuxt3",
            Self::SolidJs => "SolidJS",
            Self::Astro => "Astro",
            Self::Remix => "Remix",
            Self::Ember => "Ember",
            Self::VanillaJs => "Blank JS",
            Self::VanillaTs => "Blank TS",
            Self::Express => "Express",
            Self::Fastify => "Fastify",
            Self::Koa => "Koa",
            Self::Hapi => "Hapi",
            Self::NodeHttp => "Node HTTP",
        }
    }

    /// Kind of project this framework belongs to.
    pub(crate) fn kind(self) -> ProjectKind {
        match self {
            Self::React
            | Self::Vue
            | Self::SvelteKit
            | Self::NextJs
            | Self::Nuxt3
            | Self::SolidJs
            | Self::Astro
            | Self::Remix
            | Self::Ember => ProjectKind::Frontend,
            _ => ProjectKind::Backend,
        }
    }

    /// Runtime dependencies the framework always needs.
    pub(crate) fn dependencies(self) -> &'static [&'static str] {
        match self {
            Self::Express => &["express"],
            Self::Fastify => &["fastify"],
            Self::Koa => &["koa"],
            Self::Hapi => &["@hapi/hapi"],
            _ => &[],
        }
    }

    /// Development dependencies the framework always needs.
    pub(crate) fn dev_dependencies(self) -> &'static [&'static str] {
        match self {
            Self::Express => &["@types/express"],
            Self::Koa => &["@types/koa"],
            _ => &[],
        }
    }

    /// Optional plugins offered for this framework.
    pub(crate) fn plugins(self) -> &'static [Plugin] {
        match self {
            Self::Express => EXPRESS_PLUGINS,
            Self::Fastify => FASTIFY_PLUGINS,
            Self::Koa => KOA_PLUGINS,
            Self::Hapi => HAPI_PLUGINS,
            Self::NodeHttp => NODE_HTTP_PLUGINS,
            _ => &[],
        }
    }

    /// Prompt used when offering this framework's plugins.
    pub(crate) fn plugin_prompt(self) -> &'static str {
        match self {
            Self::Express => "Select Express plugins/middleware to include:",
            Self::Fastify => "Select Fastify plugins to include:",
            Self::Koa => "Select Koa plugins/middleware to include:",
            Self::Hapi => "Select Hapi plugins to include:",
            _ => "Select Node HTTP plugins/helpers to include:",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Framework, ProjectKind};

    #[test]
    fn frameworks_are_listed_under_their_kind() {
        for kind in ProjectKind::all() {
            for framework in kind.frameworks() {
                assert_eq!(framework.kind(), kind, "{}", framework.display_name());
            }
        }
    }

    #[test]
    fn only_backend_frameworks_offer_plugins() {
        for framework in ProjectKind::Frontend.frameworks() {
            assert!(framework.plugins().is_empty());
        }
        assert_eq!(Framework::Express.plugins().len(), 5);
        assert_eq!(Framework::Hapi.plugins().len(), 2);
    }
}
