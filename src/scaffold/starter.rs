//! Starter source files rendered from templates.

use minijinja::{Environment, context};

use crate::{
    error::{Error, Result},
    scaffold::{framework::Framework, questionnaire::Blueprint},
};

/// Emits an ES import or a CommonJS require depending on `ts`.
const IMPORT_MACRO: &str = "{% macro load(binding, module, ts) %}{% if ts %}import {{ binding }} from '{{ module }}';{% else %}const {{ binding }} = require('{{ module }}');{% endif %}{% endmacro %}";

/// Express server.
const EXPRESS: &str = "{{ load('express', 'express', ts) }}
{% for plugin in plugins %}{{ load(plugin.binding, plugin.package, ts) }}
{% endfor %}const app = express();
{% for plugin in plugins %}{{ plugin.usage }}
{% endfor %}const port = 3000;
app.get('/', (req, res) => {res.send('Hello from Express!')});
app.listen(port, () => console.log('Express server running on port', port));
";

/// Fastify server.
const FASTIFY: &str = "{{ load('Fastify', 'fastify', ts) }}
{% for plugin in plugins %}{{ load(plugin.binding, plugin.package, ts) }}
{% endfor %}const fastify = Fastify();
{% for plugin in plugins %}{{ plugin.usage }}
{% endfor %}fastify.get('/', async (request, reply) => 'Hello from Fastify!');
fastify.listen({ port: 3000 }, err => {
  if (err) throw err;
  console.log('Fastify server running on port 3000');
});
";

/// Koa server.
const KOA: &str = "{{ load('Koa', 'koa', ts) }}
{% for plugin in plugins %}{{ load(plugin.binding, plugin.package, ts) }}
{% endfor %}const app = new Koa();
{% for plugin in plugins %}{{ plugin.usage }}
{% endfor %}const port = 3000;
app.use(async ctx => {ctx.body = 'Hello from Koa!';});
app.listen(port, () => console.log('Koa server running on port', port));
";

/// Hapi server.
const HAPI: &str = "{{ load('Hapi', '@hapi/hapi', ts) }}
{% for plugin in plugins %}{{ load(plugin.binding, plugin.package, ts) }}
{% endfor %}const server = Hapi.server({ port: 3000 });
{% for plugin in plugins %}{{ plugin.usage }}
{% endfor %}server.route({method: 'GET', path: '/', handler: (request, h) => 'Hello from Hapi!'});
server.start();
console.log('Hapi server running on %s', server.info.uri);
";

/// Bare `node:http` server.
const NODE_HTTP: &str = "{{ load('http', 'node:http', ts) }}
{% for plugin in plugins %}{{ load(plugin.binding, plugin.package, ts) }}
{% endfor %}const server = http.createServer((req, res) => {
{% for plugin in plugins %}  {{ plugin.usage }}
{% endfor %}  res.writeHead(200, { 'Content-Type': 'text/plain' });
  res.end('Hello from Node HTTP!');
});
server.listen(3000, () => {
  console.log('Node HTTP server running on port 3000');
});
";

/// Hello-world for projects without a server framework.
const HELLO: &str =
    "console.log('Hello from {% if ts %}TypeScript{% else %}JavaScript{% endif %}!');\n";

/// Template body for a framework.
fn template_for(framework: Framework) -> &'static str {
    match framework {
        Framework::Express => EXPRESS,
        Framework::Fastify => FASTIFY,
        Framework::Koa => KOA,
        Framework::Hapi => HAPI,
        Framework::NodeHttp => NODE_HTTP,
        _ => HELLO,
    }
}

/// Render the starter file for a blueprint.
pub fn render(blueprint: &Blueprint) -> Result<String> {
    let source = format!("{IMPORT_MACRO}{}", template_for(blueprint.framework));
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    let template = env
        .template_from_str(&source)
        .map_err(|error| Error::TemplateRender {
            message: error.to_string(),
        })?;
    template
        .render(context! {
            ts => blueprint.language.is_typescript(),
            plugins => &blueprint.plugins,
        })
        .map_err(|error| Error::TemplateRender {
            message: error.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::scaffold::{
        framework::{Framework, Language},
        questionnaire::{Blueprint, Metadata},
    };

    fn blueprint(framework: Framework, language: Language, plugins: &[usize]) -> Blueprint {
        Blueprint {
            kind: framework.kind(),
            framework,
            plugins: plugins.iter().map(|i| framework.plugins()[*i]).collect(),
            language,
            compile: false,
            src_dir: ".".to_string(),
            out_dir: "./dist".to_string(),
            metadata: Metadata {
                name: "demo".to_string(),
                version: "1.0.0".to_string(),
                author: String::new(),
                license: "ISC".to_string(),
                description: String::new(),
            },
            watch: false,
        }
    }

    #[test]
    fn renders_hello_world() {
        let js = render(&blueprint(Framework::VanillaJs, Language::JavaScript, &[])).expect("js");
        assert_eq!(js, "console.log('Hello from JavaScript!');\n");

        let ts = render(&blueprint(Framework::VanillaTs, Language::TypeScript, &[])).expect("ts");
        assert_eq!(ts, "console.log('Hello from TypeScript!');\n");
    }

    #[test]
    fn renders_express_with_plugins_as_commonjs() {
        let rendered = render(&blueprint(Framework::Express, Language::JavaScript, &[0, 1]))
            .expect("render");

        assert!(rendered.starts_with(
            "const express = require('express');\nconst cors = require('cors');\nconst bodyParser = require('body-parser');\nconst app = express();\napp.use(cors());\n"
        ));
        assert!(rendered.contains("app.use(bodyParser.urlencoded({ extended: true }));\nconst port = 3000;"));
        assert!(rendered.ends_with("port', port));\n"));
    }

    #[test]
    fn renders_fastify_as_es_modules() {
        let rendered = render(&blueprint(Framework::Fastify, Language::TypeScript, &[0]))
            .expect("render");

        assert!(rendered.starts_with(
            "import Fastify from 'fastify';\nimport fastifyCors from '@fastify/cors';\nconst fastify = Fastify();\nfastify.register(fastifyCors);\n"
        ));
    }

    #[test]
    fn indents_node_http_helpers_inside_the_handler() {
        let rendered = render(&blueprint(Framework::NodeHttp, Language::JavaScript, &[2]))
            .expect("render");

        assert!(rendered.contains(
            "http.createServer((req, res) => {\n  // You can use cookie to parse cookies from req.headers.cookie\n  res.writeHead"
        ));
    }
}
