//! Module reference scanning over the AST
//!
//! The scanner is a visitor over the fixed set of node kinds that can carry
//! module references: import/export declarations, call expressions, dynamic
//! import expressions, and member expressions. `require()` calls and dynamic
//! imports are collected at any nesting depth, in source order.

use crate::parsers::ast_parser::StaticRef;
use oxc_ast::ast::*;

/// References collected from one parsed file
#[derive(Debug, Default)]
pub struct ScanOutput {
    /// Static references in source order
    pub static_refs: Vec<StaticRef>,

    /// String-literal dynamic import specifiers in source order
    pub dynamic_imports: Vec<String>,

    /// Whether any member expression uses the legacy `goog` object
    pub uses_goog_base: bool,

    /// Dynamic imports skipped because the argument was not a string literal
    pub ignored_dynamic_imports: usize,
}

/// Visitor collecting module references from a program
pub struct ImportScanner {
    output: ScanOutput,
}

impl ImportScanner {
    /// Scan a parsed program for module references
    pub fn scan(program: &Program<'_>) -> ScanOutput {
        let mut scanner = Self {
            output: ScanOutput::default(),
        };

        for stmt in &program.body {
            scanner.visit_statement(stmt);
        }

        scanner.output
    }

    fn visit_statement(&mut self, stmt: &Statement<'_>) {
        match stmt {
            Statement::ImportDeclaration(decl) => {
                self.output
                    .static_refs
                    .push(StaticRef::Specifier(decl.source.value.as_str().to_string()));
            }
            Statement::ExportNamedDeclaration(decl) => {
                if let Some(source) = &decl.source {
                    self.output
                        .static_refs
                        .push(StaticRef::Specifier(source.value.as_str().to_string()));
                }
                if let Some(declaration) = &decl.declaration {
                    self.visit_declaration(declaration);
                }
            }
            Statement::ExportAllDeclaration(decl) => {
                self.output
                    .static_refs
                    .push(StaticRef::Specifier(decl.source.value.as_str().to_string()));
            }
            Statement::ExportDefaultDeclaration(decl) => {
                match &decl.declaration {
                    ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                        self.visit_function(func);
                    }
                    ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                        self.visit_class(class);
                    }
                    other => {
                        if let Some(expr) = other.as_expression() {
                            self.visit_expression(expr);
                        }
                    }
                }
            }
            Statement::ExpressionStatement(expr_stmt) => {
                self.visit_expression(&expr_stmt.expression);
            }
            Statement::VariableDeclaration(var_decl) => {
                self.visit_variable_declaration(var_decl);
            }
            Statement::FunctionDeclaration(func) => {
                self.visit_function(func);
            }
            Statement::ClassDeclaration(class) => {
                self.visit_class(class);
            }
            Statement::BlockStatement(block) => {
                for stmt in &block.body {
                    self.visit_statement(stmt);
                }
            }
            Statement::IfStatement(if_stmt) => {
                self.visit_expression(&if_stmt.test);
                self.visit_statement(&if_stmt.consequent);
                if let Some(alternate) = &if_stmt.alternate {
                    self.visit_statement(alternate);
                }
            }
            Statement::ForStatement(for_stmt) => {
                if let Some(init) = &for_stmt.init {
                    match init {
                        ForStatementInit::VariableDeclaration(var_decl) => {
                            self.visit_variable_declaration(var_decl);
                        }
                        other => {
                            if let Some(expr) = other.as_expression() {
                                self.visit_expression(expr);
                            }
                        }
                    }
                }
                if let Some(test) = &for_stmt.test {
                    self.visit_expression(test);
                }
                if let Some(update) = &for_stmt.update {
                    self.visit_expression(update);
                }
                self.visit_statement(&for_stmt.body);
            }
            Statement::ForInStatement(for_in) => {
                self.visit_expression(&for_in.right);
                self.visit_statement(&for_in.body);
            }
            Statement::ForOfStatement(for_of) => {
                self.visit_expression(&for_of.right);
                self.visit_statement(&for_of.body);
            }
            Statement::WhileStatement(while_stmt) => {
                self.visit_expression(&while_stmt.test);
                self.visit_statement(&while_stmt.body);
            }
            Statement::DoWhileStatement(do_while) => {
                self.visit_statement(&do_while.body);
                self.visit_expression(&do_while.test);
            }
            Statement::SwitchStatement(switch_stmt) => {
                self.visit_expression(&switch_stmt.discriminant);
                for case in &switch_stmt.cases {
                    if let Some(test) = &case.test {
                        self.visit_expression(test);
                    }
                    for stmt in &case.consequent {
                        self.visit_statement(stmt);
                    }
                }
            }
            Statement::TryStatement(try_stmt) => {
                for stmt in &try_stmt.block.body {
                    self.visit_statement(stmt);
                }
                if let Some(handler) = &try_stmt.handler {
                    for stmt in &handler.body.body {
                        self.visit_statement(stmt);
                    }
                }
                if let Some(finalizer) = &try_stmt.finalizer {
                    for stmt in &finalizer.body {
                        self.visit_statement(stmt);
                    }
                }
            }
            Statement::ReturnStatement(ret) => {
                if let Some(argument) = &ret.argument {
                    self.visit_expression(argument);
                }
            }
            Statement::ThrowStatement(throw_stmt) => {
                self.visit_expression(&throw_stmt.argument);
            }
            Statement::LabeledStatement(labeled) => {
                self.visit_statement(&labeled.body);
            }
            _ => {}
        }
    }

    fn visit_declaration(&mut self, decl: &Declaration<'_>) {
        match decl {
            Declaration::VariableDeclaration(var_decl) => {
                self.visit_variable_declaration(var_decl);
            }
            Declaration::FunctionDeclaration(func) => {
                self.visit_function(func);
            }
            Declaration::ClassDeclaration(class) => {
                self.visit_class(class);
            }
            _ => {}
        }
    }

    fn visit_variable_declaration(&mut self, var_decl: &VariableDeclaration<'_>) {
        for declarator in &var_decl.declarations {
            if let Some(init) = &declarator.init {
                self.visit_expression(init);
            }
        }
    }

    fn visit_function(&mut self, func: &Function<'_>) {
        if let Some(body) = &func.body {
            for stmt in &body.statements {
                self.visit_statement(stmt);
            }
        }
    }

    fn visit_class(&mut self, class: &Class<'_>) {
        for element in &class.body.body {
            match element {
                ClassElement::MethodDefinition(method) => {
                    self.visit_function(&method.value);
                }
                ClassElement::PropertyDefinition(property) => {
                    if let Some(value) = &property.value {
                        self.visit_expression(value);
                    }
                }
                ClassElement::StaticBlock(block) => {
                    for stmt in &block.body {
                        self.visit_statement(stmt);
                    }
                }
                _ => {}
            }
        }
    }

    fn visit_expression(&mut self, expr: &Expression<'_>) {
        match expr {
            Expression::CallExpression(call_expr) => self.visit_call_expression(call_expr),
            Expression::NewExpression(new_expr) => {
                self.visit_expression(&new_expr.callee);
                for arg in &new_expr.arguments {
                    self.visit_argument(arg);
                }
            }
            Expression::ImportExpression(import_expr) => {
                // Dynamic import boundary; only string literals create chunks
                if let Expression::StringLiteral(lit) = &import_expr.source {
                    self.output.dynamic_imports.push(lit.value.as_str().to_string());
                } else {
                    self.output.ignored_dynamic_imports += 1;
                    self.visit_expression(&import_expr.source);
                }
            }
            Expression::AssignmentExpression(assign_expr) => {
                self.visit_assignment_target(&assign_expr.left);
                self.visit_expression(&assign_expr.right);
            }
            Expression::BinaryExpression(binary) => {
                self.visit_expression(&binary.left);
                self.visit_expression(&binary.right);
            }
            Expression::LogicalExpression(logical) => {
                self.visit_expression(&logical.left);
                self.visit_expression(&logical.right);
            }
            Expression::ConditionalExpression(conditional) => {
                self.visit_expression(&conditional.test);
                self.visit_expression(&conditional.consequent);
                self.visit_expression(&conditional.alternate);
            }
            Expression::UnaryExpression(unary) => {
                self.visit_expression(&unary.argument);
            }
            Expression::AwaitExpression(await_expr) => {
                self.visit_expression(&await_expr.argument);
            }
            Expression::SequenceExpression(sequence) => {
                for expr in &sequence.expressions {
                    self.visit_expression(expr);
                }
            }
            Expression::ParenthesizedExpression(paren) => {
                self.visit_expression(&paren.expression);
            }
            Expression::ArrowFunctionExpression(arrow) => {
                for stmt in &arrow.body.statements {
                    self.visit_statement(stmt);
                }
            }
            Expression::FunctionExpression(func) => {
                self.visit_function(func);
            }
            Expression::ObjectExpression(object) => {
                for property in &object.properties {
                    match property {
                        ObjectPropertyKind::ObjectProperty(prop) => {
                            self.visit_expression(&prop.value);
                        }
                        ObjectPropertyKind::SpreadProperty(spread) => {
                            self.visit_expression(&spread.argument);
                        }
                    }
                }
            }
            Expression::ArrayExpression(array) => {
                for element in &array.elements {
                    match element {
                        ArrayExpressionElement::SpreadElement(spread) => {
                            self.visit_expression(&spread.argument);
                        }
                        other => {
                            if let Some(expr) = other.as_expression() {
                                self.visit_expression(expr);
                            }
                        }
                    }
                }
            }
            Expression::TemplateLiteral(template) => {
                for expr in &template.expressions {
                    self.visit_expression(expr);
                }
            }
            _ => {
                // Handle MemberExpression variants through inheritance
                if let Some(member_expr) = expr.as_member_expression() {
                    self.visit_member_expression(member_expr);
                }
            }
        }
    }

    fn visit_call_expression(&mut self, expr: &CallExpression<'_>) {
        // require("X") with a single string-literal argument
        if let Expression::Identifier(ident) = &expr.callee {
            if ident.name == "require" && !expr.arguments.is_empty() {
                if let Some(Argument::StringLiteral(lit)) = expr.arguments.first() {
                    self.output
                        .static_refs
                        .push(StaticRef::Specifier(lit.value.as_str().to_string()));
                }
            }
        }

        // goog.require("NS") / goog.requireType("NS")
        if let Some(MemberExpression::StaticMemberExpression(member)) =
            expr.callee.as_member_expression()
        {
            if let Expression::Identifier(obj) = &member.object {
                if obj.name == "goog" {
                    let property = member.property.name.as_str();
                    if property == "require" || property == "requireType" {
                        if let Some(Argument::StringLiteral(lit)) = expr.arguments.first() {
                            self.output
                                .static_refs
                                .push(StaticRef::Namespace(lit.value.as_str().to_string()));
                        }
                    }
                }
            }
        }

        self.visit_expression(&expr.callee);
        for arg in &expr.arguments {
            self.visit_argument(arg);
        }
    }

    fn visit_argument(&mut self, arg: &Argument<'_>) {
        match arg {
            Argument::SpreadElement(spread) => {
                self.visit_expression(&spread.argument);
            }
            other => {
                if let Some(expr) = other.as_expression() {
                    self.visit_expression(expr);
                }
            }
        }
    }

    fn visit_member_expression(&mut self, expr: &MemberExpression<'_>) {
        match expr {
            MemberExpression::StaticMemberExpression(static_expr) => {
                if let Expression::Identifier(ident) = &static_expr.object {
                    if ident.name == "goog" {
                        self.output.uses_goog_base = true;
                    }
                }
                self.visit_expression(&static_expr.object);
            }
            MemberExpression::ComputedMemberExpression(computed_expr) => {
                if let Expression::Identifier(ident) = &computed_expr.object {
                    if ident.name == "goog" {
                        self.output.uses_goog_base = true;
                    }
                }
                self.visit_expression(&computed_expr.object);
                self.visit_expression(&computed_expr.expression);
            }
            _ => {}
        }
    }

    fn visit_assignment_target(&mut self, target: &AssignmentTarget<'_>) {
        match target {
            AssignmentTarget::StaticMemberExpression(static_expr) => {
                if let Expression::Identifier(ident) = &static_expr.object {
                    if ident.name == "goog" {
                        self.output.uses_goog_base = true;
                    }
                }
                self.visit_expression(&static_expr.object);
            }
            AssignmentTarget::ComputedMemberExpression(computed_expr) => {
                if let Expression::Identifier(ident) = &computed_expr.object {
                    if ident.name == "goog" {
                        self.output.uses_goog_base = true;
                    }
                }
                self.visit_expression(&computed_expr.object);
                self.visit_expression(&computed_expr.expression);
            }
            _ => {}
        }
    }
}
