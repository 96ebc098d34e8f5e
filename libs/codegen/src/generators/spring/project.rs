//! Build and bootstrap files

use super::types::file_header;
use super::Emit;
use crate::generators::GeneratedSources;
use std::collections::BTreeSet;

const SPRING_BOOT_VERSION: &str = "3.3.3";
const JAVA_VERSION: &str = "21";
const APPLICATION_CLASS: &str = "Application";

pub(super) fn render(emit: &Emit<'_>, sources: &mut GeneratedSources) {
    sources.insert("pom.xml", pom(emit));
    sources.insert(
        emit.source_path(None, APPLICATION_CLASS),
        application(emit),
    );
    sources.insert(
        emit.resource_path("application.properties"),
        properties(emit),
    );
}

fn pom(emit: &Emit<'_>) -> String {
    let project = &emit.model.project;
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
  <modelVersion>4.0.0</modelVersion>
  <groupId>{group}</groupId>
  <artifactId>{artifact}</artifactId>
  <version>{version}</version>
  <name>{name}</name>
  <properties>
    <java.version>{JAVA_VERSION}</java.version>
    <maven.compiler.release>{JAVA_VERSION}</maven.compiler.release>
    <spring-boot.version>{SPRING_BOOT_VERSION}</spring-boot.version>
  </properties>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>org.springframework.boot</groupId>
        <artifactId>spring-boot-dependencies</artifactId>
        <version>${{spring-boot.version}}</version>
        <type>pom</type>
        <scope>import</scope>
      </dependency>
    </dependencies>
  </dependencyManagement>
  <dependencies>
    <dependency>
      <groupId>org.springframework.boot</groupId>
      <artifactId>spring-boot-starter-web</artifactId>
    </dependency>
    <dependency>
      <groupId>org.springframework.boot</groupId>
      <artifactId>spring-boot-starter-data-jpa</artifactId>
    </dependency>
    <dependency>
      <groupId>com.mysql</groupId>
      <artifactId>mysql-connector-j</artifactId>
      <scope>runtime</scope>
    </dependency>
  </dependencies>
  <build>
    <plugins>
      <plugin>
        <groupId>org.springframework.boot</groupId>
        <artifactId>spring-boot-maven-plugin</artifactId>
        <version>${{spring-boot.version}}</version>
      </plugin>
    </plugins>
  </build>
</project>
"#,
        group = project.package_namespace,
        artifact = project.artifact_id,
        version = xml_escape(&project.version),
        name = xml_escape(&project.name),
    )
}

fn application(emit: &Emit<'_>) -> String {
    let imports = BTreeSet::from([
        "org.springframework.boot.SpringApplication".to_string(),
        "org.springframework.boot.autoconfigure.SpringBootApplication".to_string(),
    ]);
    let mut code = file_header(emit.namespace(), &imports);
    code.push_str(&format!(
        "@SpringBootApplication\npublic class {APPLICATION_CLASS} {{\n\n    public static void main(String[] args) {{\n        SpringApplication.run({APPLICATION_CLASS}.class, args);\n    }}\n}}\n"
    ));
    code
}

fn properties(emit: &Emit<'_>) -> String {
    let project = &emit.model.project;
    format!(
        "spring.application.name={artifact}\n\
         spring.datasource.url=jdbc:mysql://localhost:3306/{database}?useSSL=false&serverTimezone=UTC\n\
         spring.datasource.username=root\n\
         spring.datasource.password=secret\n\
         spring.jpa.hibernate.ddl-auto=update\n\
         spring.jpa.show-sql=true\n",
        artifact = project.artifact_id,
        database = project.artifact_id.replace('-', "_"),
    )
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
