use std::fmt::Write as _;

use strata_model::ComponentName;

use crate::{Artifact, Error, ServiceStub, StackRenderer, StubKind};

const SERVICE_PORT: u16 = 80;
const DOCUMENT_STORE_PORT: u16 = 8000;

/// The stock Flask / Express / MySQL / DynamoDB-Local stack. Each stub lands
/// in its own `<name>/` directory under the output root.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultStack;

impl StackRenderer for DefaultStack {
    fn render(&self, stub: &ServiceStub) -> Result<Vec<Artifact>, Error> {
        let name = &stub.name;
        let artifacts = match &stub.kind {
            StubKind::Database => vec![Artifact::new(
                format!("{name}/init.sql"),
                database_init_sql(),
            )],
            StubKind::DocumentStore => vec![Artifact::new(
                format!("{name}/README.md"),
                document_store_readme(name),
            )],
            StubKind::Backend {
                database,
                document_store,
            } => vec![
                Artifact::new(
                    format!("{name}/app.py"),
                    backend_app(database.as_ref(), document_store.as_ref()),
                ),
                Artifact::new(format!("{name}/Dockerfile"), backend_dockerfile()),
            ],
            StubKind::Frontend { backend } => vec![
                Artifact::new(format!("{name}/package.json"), frontend_package_json()),
                Artifact::new(format!("{name}/app.js"), frontend_app(backend.as_ref())),
                Artifact::new(format!("{name}/Dockerfile"), frontend_dockerfile()),
            ],
            StubKind::Service { role } => vec![Artifact::new(
                format!("{name}/README.md"),
                service_readme(name, role),
            )],
        };
        Ok(artifacts)
    }
}

fn database_init_sql() -> String {
    "CREATE TABLE IF NOT EXISTS systems (\n    \
         id INT AUTO_INCREMENT PRIMARY KEY,\n    \
         name VARCHAR(255)\n\
     );\n"
        .to_string()
}

fn document_store_readme(name: &ComponentName) -> String {
    format!(
        "# {name}\n\n\
         Runs a local DynamoDB instance for development.\n\
         Reachable from the other services at `http://{name}:{DOCUMENT_STORE_PORT}`.\n"
    )
}

fn service_readme(name: &ComponentName, role: &str) -> String {
    format!(
        "# {name}\n\n\
         Placeholder for the `{role}` service. Add an implementation and a\n\
         Dockerfile here, then rebuild the deployment.\n"
    )
}

fn backend_app(database: Option<&ComponentName>, document_store: Option<&ComponentName>) -> String {
    let mut app = String::new();

    app.push_str("from flask import Flask, request, jsonify\n");
    if database.is_some() {
        app.push_str("import mysql.connector\n");
    }
    if document_store.is_some() {
        app.push_str("import boto3\n");
    }
    app.push_str("\napp = Flask(__name__)\n\n");

    match database {
        Some(database) => writeln!(app, "MYSQL_HOST = '{database}'").unwrap(),
        None => app.push_str("MYSQL_HOST = None\n"),
    }
    match document_store {
        Some(store) => {
            writeln!(app, "DYNAMO_HOST = 'http://{store}:{DOCUMENT_STORE_PORT}'").unwrap()
        }
        None => app.push_str("DYNAMO_HOST = None\n"),
    }

    app.push_str(
        "\n\n@app.route('/create', methods=['POST'])\n\
         def create():\n    \
             data = request.json\n    \
             results = {}\n",
    );
    if let Some(database) = database {
        write!(
            app,
            "\n    if MYSQL_HOST:\n        \
                 conn = mysql.connector.connect(\n            \
                     host=MYSQL_HOST,\n            \
                     user='root',\n            \
                     password='root',\n            \
                     database='{database}',\n        \
                 )\n        \
                 cursor = conn.cursor()\n        \
                 cursor.execute(\"INSERT INTO systems (name) VALUES (%s)\", (data['name'],))\n        \
                 conn.commit()\n        \
                 cursor.close()\n        \
                 conn.close()\n        \
                 results['mysql'] = 'created'\n"
        )
        .unwrap();
    }
    if document_store.is_some() {
        app.push_str(
            "\n    if DYNAMO_HOST:\n        \
                 dynamodb = boto3.resource('dynamodb', endpoint_url=DYNAMO_HOST, region_name='us-west-2')\n        \
                 table = dynamodb.Table('Systems')\n        \
                 table.put_item(Item={'id': str(hash(data['name'])), 'name': data['name']})\n        \
                 results['dynamo'] = 'created'\n",
        );
    }
    app.push_str("\n    return jsonify(results)\n");

    app.push_str(
        "\n\n@app.route('/systems')\n\
         def get_systems():\n    \
             result = {}\n",
    );
    if let Some(database) = database {
        write!(
            app,
            "\n    if MYSQL_HOST:\n        \
                 conn = mysql.connector.connect(\n            \
                     host=MYSQL_HOST,\n            \
                     user='root',\n            \
                     password='root',\n            \
                     database='{database}',\n        \
                 )\n        \
                 cursor = conn.cursor()\n        \
                 cursor.execute(\"SELECT * FROM systems\")\n        \
                 result['mysql'] = cursor.fetchall()\n        \
                 cursor.close()\n        \
                 conn.close()\n"
        )
        .unwrap();
    }
    if document_store.is_some() {
        app.push_str(
            "\n    if DYNAMO_HOST:\n        \
                 dynamodb = boto3.resource('dynamodb', endpoint_url=DYNAMO_HOST, region_name='us-west-2')\n        \
                 table = dynamodb.Table('Systems')\n        \
                 result['dynamo'] = table.scan()['Items']\n",
        );
    }
    app.push_str("\n    return jsonify(result)\n");

    writeln!(
        app,
        "\n\nif __name__ == '__main__':\n    app.run(host='0.0.0.0', port={SERVICE_PORT})"
    )
    .unwrap();

    app
}

fn backend_dockerfile() -> String {
    "FROM python:3.11-slim\n\
     WORKDIR /app\n\
     COPY . .\n\
     RUN pip install flask mysql-connector-python boto3\n\
     CMD [\"python\", \"app.py\"]\n"
        .to_string()
}

fn frontend_package_json() -> String {
    "{\n    \
         \"name\": \"frontend\",\n    \
         \"version\": \"1.0.0\",\n    \
         \"main\": \"app.js\",\n    \
         \"dependencies\": {\n        \
             \"express\": \"^4.18.2\",\n        \
             \"axios\": \"^1.6.7\"\n    \
         }\n\
     }\n"
        .to_string()
}

fn frontend_app(backend: Option<&ComponentName>) -> String {
    let backend_url = match backend {
        Some(backend) => format!("'http://{backend}:{SERVICE_PORT}'"),
        None => "null".to_string(),
    };

    format!(
        "const express = require('express');\n\
         const axios = require('axios');\n\
         const app = express();\n\
         \n\
         app.use(express.json());\n\
         app.use(express.urlencoded({{ extended: true }}));\n\
         \n\
         const BACKEND_URL = {backend_url};\n\
         \n\
         app.get('/', async (req, res) => {{\n    \
             if (!BACKEND_URL) {{\n        \
                 return res.status(503).send('No backend bound');\n    \
             }}\n    \
             try {{\n        \
                 const response = await axios.get(`${{BACKEND_URL}}/systems`);\n        \
                 const systems = response.data.mysql || [];\n        \
                 const list = systems.map(([id, name]) => `<li>${{name}}</li>`).join('');\n        \
                 res.send(`\n            \
                     <html>\n                \
                         <body>\n                    \
                             <h1>Frontend</h1>\n                    \
                             <form method=\"POST\" action=\"/create\">\n                        \
                                 <input name=\"name\" />\n                        \
                                 <button type=\"submit\">Create</button>\n                    \
                             </form>\n                    \
                             <ul>${{list}}</ul>\n                \
                         </body>\n            \
                     </html>\n        \
                 `);\n    \
             }} catch (err) {{\n        \
                 res.status(500).send('Error contacting backend');\n    \
             }}\n\
         }});\n\
         \n\
         app.post('/create', async (req, res) => {{\n    \
             if (!BACKEND_URL) {{\n        \
                 return res.status(503).send('No backend bound');\n    \
             }}\n    \
             await axios.post(`${{BACKEND_URL}}/create`, {{ name: req.body.name }});\n    \
             res.redirect('/');\n\
         }});\n\
         \n\
         app.listen({SERVICE_PORT}, () => console.log('Frontend running on port {SERVICE_PORT}'));\n"
    )
}

fn frontend_dockerfile() -> String {
    "FROM node:18\n\
     WORKDIR /app\n\
     COPY . .\n\
     RUN npm install\n\
     CMD [\"node\", \"app.js\"]\n"
        .to_string()
}
