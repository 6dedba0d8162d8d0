//! Rendering of the query model to PostgreSQL
//!
//! A [`Select`] is turned into a `sqlx::QueryBuilder` with every filter
//! value bound as a parameter. Rendering never touches the database.

use sqlx::{Postgres, QueryBuilder};

use digest_core::query::{Column, ColumnValue, Entity, Filter, FilterOp, Select};

/// Builds SELECT and COUNT statements for one composed query
pub struct SelectBuilder<'s, E: Entity> {
    select: &'s Select<E>,
}

impl<'s, E: Entity> SelectBuilder<'s, E> {
    pub fn new(select: &'s Select<E>) -> Self {
        Self { select }
    }

    /// `SELECT <projection> FROM <table> WHERE .. ORDER BY .. LIMIT .. OFFSET ..`
    pub fn build(&self) -> QueryBuilder<'static, Postgres> {
        let columns = self
            .select
            .columns()
            .into_iter()
            .map(Column::name)
            .collect::<Vec<_>>()
            .join(", ");

        let mut qb = QueryBuilder::new(format!("SELECT {columns} FROM {}", E::TABLE));
        self.add_filters(&mut qb);
        self.add_sorts(&mut qb);
        self.add_pager(&mut qb);
        qb
    }

    /// `SELECT COUNT(*) FROM <table> WHERE ..`, ignoring sort and pager
    pub fn build_count(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", E::TABLE));
        self.add_filters(&mut qb);
        qb
    }

    fn add_filters(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        for (i, filter) in self.select.filters.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            push_condition(qb, filter);
        }
    }

    fn add_sorts(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        for (i, field) in self.select.sort.iter().enumerate() {
            qb.push(if i == 0 { " ORDER BY " } else { ", " });
            qb.push(field.column.name())
                .push(" ")
                .push(field.direction.as_sql())
                .push(" NULLS LAST");
        }
    }

    fn add_pager(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        if let Some(limit) = self.select.pager.limit() {
            qb.push(format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.select.pager.offset() {
            qb.push(format!(" OFFSET {offset}"));
        }
    }
}

/// `UPDATE <table> SET <mutable columns> WHERE <key>` for one record.
///
/// Columns listed in `Entity::IMMUTABLE` are never written.
pub fn build_update<E: Entity>(record: &E) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", E::TABLE));

    let mutable = E::COLUMNS.iter().filter(|c| !E::IMMUTABLE.contains(c));
    for (i, column) in mutable.enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(column.name()).push(" = ");
        push_value(&mut qb, &column.value(record));
    }

    for (i, column) in E::KEY.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        qb.push(column.name()).push(" = ");
        push_value(&mut qb, &column.value(record));
    }
    qb
}

fn push_condition<C: Column>(qb: &mut QueryBuilder<'static, Postgres>, filter: &Filter<C>) {
    let name = filter.column.name();
    let (operator, value) = match &filter.op {
        FilterOp::Eq(v) => ("=", v),
        FilterOp::NotEq(v) => ("<>", v),
        FilterOp::Gt(v) => (">", v),
        FilterOp::Gte(v) => (">=", v),
        FilterOp::Lt(v) => ("<", v),
        FilterOp::Lte(v) => ("<=", v),
        FilterOp::IsNull => {
            qb.push(name).push(" IS NULL");
            return;
        }
        FilterOp::IsNotNull => {
            qb.push(name).push(" IS NOT NULL");
            return;
        }
        FilterOp::In(values) if values.is_empty() => {
            qb.push("FALSE");
            return;
        }
        FilterOp::In(values) => {
            qb.push(name).push(" IN (");
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    qb.push(", ");
                }
                push_value(qb, value);
            }
            qb.push(")");
            return;
        }
    };

    qb.push(name).push(" ").push(operator).push(" ");
    push_value(qb, value);
}

fn push_value(qb: &mut QueryBuilder<'static, Postgres>, value: &ColumnValue) {
    match value {
        // compares as unknown, so `col = NULL` never matches
        ColumnValue::Null => {
            qb.push("NULL");
        }
        ColumnValue::Int(v) => {
            qb.push_bind(*v);
        }
        ColumnValue::Timestamp(t) => {
            qb.push_bind(*t);
        }
    }
}
