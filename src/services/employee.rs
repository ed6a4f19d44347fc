//! Employee service
//!
//! Business logic for employee records: creation with generated
//! identifiers, lookup by id or name, updates, listings, filters, payroll
//! statistics and CSV export.
//!
//! Mutations change the in-memory store only; callers decide when to save.

use std::cmp::Ordering;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;

use super::filter::{filter_records, Criterion};
use super::search::{resolve, SearchOutcome};
use crate::error::{RosterError, RosterResult};
use crate::export::export_csv_to_path;
use crate::models::employee::{normalize_position, validate_salary, EMPLOYEE_FIELDS};
use crate::models::{validate_name, Employee};
use crate::reports::PayrollReport;
use crate::storage::Storage;

/// Input for a new employee
#[derive(Debug, Clone, Default)]
pub struct NewEmployee {
    pub name: String,
    pub department: String,
    pub salary: f64,
    /// Defaults to "Staff"
    pub position: Option<String>,
    /// Defaults to today
    pub hire_date: Option<NaiveDate>,
}

/// Changes to apply to an employee; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub salary: Option<f64>,
    pub hire_date: Option<NaiveDate>,
}

impl EmployeeUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.position.is_none()
            && self.department.is_none()
            && self.salary.is_none()
            && self.hire_date.is_none()
    }
}

/// Display order for employee listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmployeeSortKey {
    #[default]
    Name,
    Id,
    /// Highest salary first
    Salary,
    Department,
    HireDate,
}

impl FromStr for EmployeeSortKey {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "name" => Ok(Self::Name),
            "id" => Ok(Self::Id),
            "salary" => Ok(Self::Salary),
            "department" | "dept" => Ok(Self::Department),
            "hire_date" | "hired" => Ok(Self::HireDate),
            other => Err(RosterError::Validation(format!(
                "Unknown sort key '{}'. Use name, id, salary, department or hire-date",
                other
            ))),
        }
    }
}

/// Service for employee management
pub struct EmployeeService<'a> {
    storage: &'a Storage,
}

impl<'a> EmployeeService<'a> {
    /// Create a new employee service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new employee with the next free identifier
    pub fn create(&self, input: NewEmployee) -> RosterResult<Employee> {
        let name = input.name.trim().to_string();
        validate_name(&name)?;
        validate_salary(input.salary)?;
        let department = input.department.trim().to_string();

        self.storage.employees.insert_new(|id| {
            let mut employee = Employee::new(id, name, department, input.salary)
                .with_position(input.position.unwrap_or_default());
            if let Some(hire_date) = input.hire_date {
                employee = employee.with_hire_date(hire_date);
            }
            employee.validate()?;
            Ok(employee)
        })
    }

    /// Resolve a query against all employees
    pub fn read(&self, query: &str) -> RosterResult<SearchOutcome<Employee>> {
        Ok(resolve(query, &self.storage.employees.all()?))
    }

    /// Resolve a query to exactly one employee
    pub fn find(&self, query: &str, pick: Option<usize>) -> RosterResult<Employee> {
        self.read(query)?.into_single(query, pick)
    }

    /// Get an employee by identifier
    pub fn get(&self, id: &str) -> RosterResult<Employee> {
        self.storage.employees.get(id)
    }

    /// Apply an update; nothing changes when any new value is invalid
    pub fn update(&self, id: &str, changes: EmployeeUpdate) -> RosterResult<Employee> {
        self.storage.employees.update(id, |employee| {
            if let Some(name) = changes.name {
                employee.name = name.trim().to_string();
            }
            if let Some(position) = changes.position {
                employee.position = normalize_position(&position);
            }
            if let Some(department) = changes.department {
                employee.department = department.trim().to_string();
            }
            if let Some(salary) = changes.salary {
                employee.salary = salary;
            }
            if let Some(hire_date) = changes.hire_date {
                employee.hire_date = hire_date;
            }
            employee.validate()
        })
    }

    /// Delete an employee, returning the removed record
    pub fn delete(&self, id: &str) -> RosterResult<Employee> {
        self.storage.employees.delete(id)
    }

    /// All employees in the requested order
    pub fn list_all(&self, sort: EmployeeSortKey) -> RosterResult<Vec<Employee>> {
        let mut employees = self.storage.employees.all()?;
        sort_employees(&mut employees, sort);
        Ok(employees)
    }

    /// Employees satisfying every criterion, sorted by name
    pub fn filter(&self, criteria: &[Criterion]) -> RosterResult<Vec<Employee>> {
        let mut employees = filter_records(&self.storage.employees.all()?, criteria)?;
        sort_employees(&mut employees, EmployeeSortKey::Name);
        Ok(employees)
    }

    /// Payroll statistics over all employees
    pub fn stats(&self, band_edges: &[f64]) -> RosterResult<PayrollReport> {
        PayrollReport::generate(&self.storage.employees.all()?, band_edges)
    }

    /// Employees grouped by department, departments and members by name
    pub fn by_department(&self) -> RosterResult<Vec<(String, Vec<Employee>)>> {
        let mut groups: Vec<(String, Vec<Employee>)> = Vec::new();
        for employee in self.list_all(EmployeeSortKey::Name)? {
            match groups.iter_mut().find(|(d, _)| *d == employee.department) {
                Some((_, members)) => members.push(employee),
                None => groups.push((employee.department.clone(), vec![employee])),
            }
        }
        groups.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(groups)
    }

    /// Number of employees
    pub fn count(&self) -> RosterResult<usize> {
        self.storage.employees.len()
    }

    /// Columns exported when none are requested
    pub fn default_export_fields(&self) -> Vec<String> {
        EMPLOYEE_FIELDS.iter().map(|f| f.to_string()).collect()
    }

    /// Export all employees, in store order, to a CSV file
    pub fn export_csv(&self, path: &Path, fields: &[String]) -> RosterResult<()> {
        export_csv_to_path(&self.storage.employees.all()?, fields, path)
    }
}

fn by_name(a: &Employee, b: &Employee) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.emp_id.cmp(&b.emp_id))
}

fn sort_employees(employees: &mut [Employee], sort: EmployeeSortKey) {
    match sort {
        EmployeeSortKey::Name => employees.sort_by(by_name),
        EmployeeSortKey::Id => employees.sort_by(|a, b| {
            a.emp_id
                .len()
                .cmp(&b.emp_id.len())
                .then_with(|| a.emp_id.cmp(&b.emp_id))
        }),
        EmployeeSortKey::Salary => employees.sort_by(|a, b| {
            b.salary
                .partial_cmp(&a.salary)
                .unwrap_or(Ordering::Equal)
                .then_with(|| by_name(a, b))
        }),
        EmployeeSortKey::Department => employees.sort_by(|a, b| {
            a.department
                .to_lowercase()
                .cmp(&b.department.to_lowercase())
                .then_with(|| by_name(a, b))
        }),
        EmployeeSortKey::HireDate => {
            employees.sort_by(|a, b| a.hire_date.cmp(&b.hire_date).then_with(|| by_name(a, b)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RosterPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = RosterPaths::with_base_dir(temp_dir.path().to_path_buf());
        let (storage, _) = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn hire(service: &EmployeeService, name: &str, department: &str, salary: f64) -> Employee {
        service
            .create(NewEmployee {
                name: name.into(),
                department: department.into(),
                salary,
                ..Default::default()
            })
            .unwrap()
    }

    #[test]
    fn test_create_employee() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EmployeeService::new(&storage);

        let employee = service
            .create(NewEmployee {
                name: "  Asha Rao ".into(),
                department: "Engineering".into(),
                salary: 72000.0,
                position: Some("Developer".into()),
                hire_date: NaiveDate::from_ymd_opt(2023, 7, 4),
            })
            .unwrap();

        assert_eq!(employee.emp_id, "EMP001");
        assert_eq!(employee.name, "Asha Rao");
        assert_eq!(employee.position, "Developer");
        assert_eq!(service.get("EMP001").unwrap(), employee);
    }

    #[test]
    fn test_create_defaults_position() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EmployeeService::new(&storage);
        let employee = hire(&service, "Sam", "Sales", 40000.0);
        assert_eq!(employee.position, "Staff");
    }

    #[test]
    fn test_create_rejects_invalid() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EmployeeService::new(&storage);

        let blank = service.create(NewEmployee {
            name: "  ".into(),
            salary: 1000.0,
            ..Default::default()
        });
        assert!(blank.unwrap_err().is_validation());

        let negative = service.create(NewEmployee {
            name: "Sam".into(),
            salary: -1.0,
            ..Default::default()
        });
        assert!(negative.unwrap_err().is_validation());
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_then_create_does_not_reuse_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EmployeeService::new(&storage);
        hire(&service, "A", "X", 1.0);
        hire(&service, "B", "X", 1.0);
        service.delete("EMP001").unwrap();

        let c = hire(&service, "C", "X", 1.0);
        assert_eq!(c.emp_id, "EMP003");
    }

    #[test]
    fn test_find_by_name_and_pick() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EmployeeService::new(&storage);
        hire(&service, "Ann Lee", "Sales", 1.0);
        hire(&service, "Anna Ray", "Sales", 1.0);

        assert_eq!(service.find("ann lee", None).unwrap().emp_id, "EMP001");
        assert!(matches!(
            service.find("ann", None),
            Err(RosterError::AmbiguousMatches { count: 2, .. })
        ));
        assert_eq!(service.find("ann", Some(2)).unwrap().emp_id, "EMP002");
        assert!(service.find("zed", None).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_employee() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EmployeeService::new(&storage);
        hire(&service, "Sam", "Sales", 40000.0);

        let updated = service
            .update(
                "EMP001",
                EmployeeUpdate {
                    department: Some("Marketing".into()),
                    salary: Some(45000.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.department, "Marketing");
        assert_eq!(updated.salary, 45000.0);
        assert_eq!(updated.name, "Sam");
    }

    #[test]
    fn test_invalid_update_leaves_record() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EmployeeService::new(&storage);
        let before = hire(&service, "Sam", "Sales", 40000.0);

        let err = service
            .update(
                "EMP001",
                EmployeeUpdate {
                    department: Some("Marketing".into()),
                    salary: Some(-5.0),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.get("EMP001").unwrap(), before);
    }

    #[test]
    fn test_list_sorting() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EmployeeService::new(&storage);
        hire(&service, "Cara", "Ops", 30000.0);
        hire(&service, "alan", "Sales", 90000.0);
        hire(&service, "Ben", "Ops", 50000.0);

        let names = |list: Vec<Employee>| list.into_iter().map(|e| e.name).collect::<Vec<_>>();
        assert_eq!(names(service.list_all(EmployeeSortKey::Name).unwrap()), ["alan", "Ben", "Cara"]);
        assert_eq!(names(service.list_all(EmployeeSortKey::Salary).unwrap()), ["alan", "Ben", "Cara"]);
        assert_eq!(names(service.list_all(EmployeeSortKey::Id).unwrap()), ["Cara", "alan", "Ben"]);
        assert_eq!(
            names(service.list_all(EmployeeSortKey::Department).unwrap()),
            ["Ben", "Cara", "alan"]
        );
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("hire-date".parse::<EmployeeSortKey>().unwrap(), EmployeeSortKey::HireDate);
        assert_eq!("Salary".parse::<EmployeeSortKey>().unwrap(), EmployeeSortKey::Salary);
        assert!("age".parse::<EmployeeSortKey>().is_err());
    }

    #[test]
    fn test_filter_salary_range() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EmployeeService::new(&storage);
        hire(&service, "Zoe", "Ops", 45000.0);
        hire(&service, "Amy", "Ops", 30000.0);
        hire(&service, "Max", "Ops", 52000.0);

        let criteria = [Criterion::range("salary", Some(30000.0), Some(50000.0)).unwrap()];
        let found = service.filter(&criteria).unwrap();
        let names: Vec<_> = found.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Amy", "Zoe"]);

        assert!(matches!(
            Criterion::range("salary", Some(50000.0), Some(30000.0)),
            Err(RosterError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_filter_department_substring() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EmployeeService::new(&storage);
        hire(&service, "Zoe", "Engineering", 1.0);
        hire(&service, "Amy", "Sales", 1.0);

        let found = service.filter(&[Criterion::contains("department", "engin")]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Zoe");
    }

    #[test]
    fn test_by_department() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EmployeeService::new(&storage);
        hire(&service, "Zoe", "Sales", 1.0);
        hire(&service, "Amy", "Engineering", 1.0);
        hire(&service, "Bob", "Sales", 1.0);

        let groups = service.by_department().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Engineering");
        assert_eq!(groups[1].0, "Sales");
        let sales: Vec<_> = groups[1].1.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(sales, ["Bob", "Zoe"]);
    }

    #[test]
    fn test_stats_empty_store() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EmployeeService::new(&storage);
        assert!(matches!(
            service.stats(&[30000.0]),
            Err(RosterError::EmptyStore("Employee"))
        ));
    }

    #[test]
    fn test_export_csv() {
        let (temp_dir, storage) = create_test_storage();
        let service = EmployeeService::new(&storage);
        hire(&service, "Zoe", "Sales", 41000.0);

        let path = temp_dir.path().join("out.csv");
        service.export_csv(&path, &service.default_export_fields()).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("emp_id,name,position,department,salary,hire_date\n"));
        assert!(contents.contains("EMP001,Zoe,Staff,Sales,41000,"));
    }
}
