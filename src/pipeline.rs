//! Generate → filter → chart
//!
//! One parameterized pipeline shared by the HTTP handlers and the CLI.
//! Every call regenerates the dataset from the seed; nothing is cached.

use chrono::NaiveDate;

use crate::chart::{ChartBuilder, ChartConfig, Figure};
use crate::dataset::{
    generate, Dataset, DatasetResult, DatasetSpec, DateRange, DepartmentSelection, Filter,
    FilterWarning, Record,
};

/// Raw control values; `None` means "use the default"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub departments: Option<Vec<String>>,
}

impl FilterParams {
    pub fn departments<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.departments = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn from_date(mut self, date: NaiveDate) -> Self {
        self.from = Some(date);
        self
    }

    pub fn to_date(mut self, date: NaiveDate) -> Self {
        self.to = Some(date);
        self
    }
}

/// Everything one page render needs
#[derive(Debug, Clone)]
pub struct Rendered {
    pub dataset: Dataset,
    pub filter: Filter,
    pub records: Vec<Record>,
    pub warning: Option<FilterWarning>,
    pub figure: Figure,
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    spec: DatasetSpec,
    chart: ChartBuilder,
}

impl Pipeline {
    pub fn new(spec: DatasetSpec, chart: ChartConfig) -> Self {
        Self {
            spec,
            chart: ChartBuilder::new(chart),
        }
    }

    pub fn spec(&self) -> &DatasetSpec {
        &self.spec
    }

    pub fn chart_config(&self) -> &ChartConfig {
        self.chart.config()
    }

    pub fn generate(&self) -> Dataset {
        generate(&self.spec)
    }

    /// Turn control values into a filter, filling gaps from the dataset span
    pub fn resolve_filter(
        &self,
        dataset: &Dataset,
        params: &FilterParams,
    ) -> DatasetResult<Filter> {
        let span = DateRange::for_dataset(dataset);
        let from = params
            .from
            .or_else(|| span.map(|s| s.start()))
            .unwrap_or(NaiveDate::MIN);
        let to = params
            .to
            .or_else(|| span.map(|s| s.end()))
            .unwrap_or(NaiveDate::MAX);
        let range = DateRange::new(from, to)?;

        let departments = match &params.departments {
            Some(labels) => DepartmentSelection::only(labels.iter().cloned()),
            None => DepartmentSelection::All,
        };

        let filter = Filter::new(range, departments);
        filter.check_departments(dataset)?;
        Ok(filter)
    }

    /// Run the whole pipeline for one set of control values
    pub fn render(&self, params: &FilterParams) -> DatasetResult<Rendered> {
        let dataset = self.generate();
        let filter = self.resolve_filter(&dataset, params)?;

        let view = filter.apply(&dataset);
        let figure = self.chart.build(view.records());
        let records = view.to_records();
        let warning = view.warning();

        Ok(Rendered {
            dataset,
            filter,
            records,
            warning,
            figure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults_render_everything() {
        let rendered = Pipeline::default().render(&FilterParams::default()).unwrap();
        assert_eq!(rendered.dataset.len(), 72);
        assert_eq!(rendered.records.len(), 72);
        assert!(rendered.warning.is_none());
        assert_eq!(rendered.figure.frames.len(), 12);
        assert_eq!(rendered.filter.range.start(), date(2023, 1, 1));
        assert_eq!(rendered.filter.range.end(), date(2023, 12, 1));
    }

    #[test]
    fn test_end_to_end_hr_only() {
        let params = FilterParams::default()
            .from_date(date(2023, 1, 1))
            .to_date(date(2023, 12, 31))
            .departments(["HR"]);
        let rendered = Pipeline::default().render(&params).unwrap();

        assert_eq!(rendered.dataset.len(), 72);
        assert_eq!(rendered.records.len(), 12);
        assert!(rendered.records.iter().all(|r| r.department == "HR"));
        assert_eq!(rendered.figure.frames.len(), 12);
        assert!(rendered.figure.frames.iter().all(|f| f.data.len() == 1));
    }

    #[test]
    fn test_empty_selection_renders_warning() {
        let params = FilterParams::default().departments(Vec::<String>::new());
        let rendered = Pipeline::default().render(&params).unwrap();

        assert!(rendered.records.is_empty());
        assert_eq!(rendered.warning, Some(FilterWarning::NoDepartmentsSelected));
        assert!(rendered.figure.frames.is_empty());
        assert_eq!(rendered.dataset.len(), 72);
    }

    #[test]
    fn test_partial_range_defaults_other_end() {
        let params = FilterParams::default().from_date(date(2023, 11, 1));
        let rendered = Pipeline::default().render(&params).unwrap();
        assert_eq!(rendered.records.len(), 2 * 6);
    }

    #[test]
    fn test_inverted_range_is_error() {
        let params = FilterParams::default()
            .from_date(date(2023, 6, 1))
            .to_date(date(2023, 2, 1));
        let err = Pipeline::default().render(&params).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_unknown_department_is_error() {
        let params = FilterParams::default().departments(["HR", "Legal"]);
        let err = Pipeline::default().render(&params).unwrap_err();
        assert_eq!(err, DatasetError::UnknownDepartment("Legal".to_string()));
    }

    #[test]
    fn test_seed_changes_values_not_shape() {
        let a = Pipeline::default().generate();
        let b = Pipeline::new(DatasetSpec::default().with_seed(1), ChartConfig::default())
            .generate();
        assert_eq!(a.len(), b.len());
        assert_ne!(a.records(), b.records());
    }
}
