//! # Summary Screen
//!
//! The owner's dashboard. Admin only.
//!
//! ## Month Ledger
//! ```text
//!   revenue side                cost side
//!   ─────────────               ──────────────
//!   shift takings (gabinet)     AP invoices paid this month
//! + AR invoices paid this     + lease installments active this month
//!   month                     + salaries of the current active roster
//!   ─────────────               ──────────────
//!                net = revenue − cost
//! ```
//!
//! Salaries deliberately use today's roster for every month shown,
//! including historical trend points.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ScreenError;
use crate::screens::{farm, shop};
use crate::session::Session;
use vetfin_core::{
    fill_daily, trailing_months, AgingReport, Money, MonthlySummary, PayableInvoice,
    StaffMonthlyStats, TrendPoint, YearMonth,
};
use vetfin_db::Database;

/// Months covered by the trend chart, current month included.
const TREND_MONTHS: usize = 12;

/// Everything the dashboard renders for one month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthOverview {
    pub month: YearMonth,
    pub summary: MonthlySummary,
    /// Takings per calendar day, zero-filled, for the daily chart.
    pub daily: Vec<(NaiveDate, Money)>,
    /// AR collections per calendar day, zero-filled, scoped by paid date.
    pub daily_ar_paid: Vec<(NaiveDate, Money)>,
    /// AP payments per calendar day, zero-filled, scoped by paid date.
    pub daily_ap_paid: Vec<(NaiveDate, Money)>,
    /// Per-person shift counts and attributed revenue, highest first.
    pub staff: Vec<StaffMonthlyStats>,
    /// Unpaid AP invoices falling due within the chosen horizon.
    pub due_soon: Vec<PayableInvoice>,
    pub aging: AgingReport,
    pub shop: shop::ShopMonth,
    pub farm: farm::FarmMonth,
}

/// The five monthly ledger quantities for one month.
pub async fn month_summary(db: &Database, month: YearMonth) -> Result<MonthlySummary, ScreenError> {
    let (first, last) = month.bounds();

    // Accessors hand out owned repositories; keep them alive across the join.
    let shifts = db.shifts();
    let receivables = db.receivables();
    let payables = db.payables();
    let leases = db.leases();
    let employees = db.employees();

    let (revenue_gabinet, ar_paid, ap_paid, leasing, salaries) = tokio::try_join!(
        shifts.revenue_between(first, last),
        receivables.paid_total_between(first, last),
        payables.paid_total_between(first, last),
        leases.monthly_total_active(first, last),
        employees.salary_total_active(),
    )?;

    Ok(MonthlySummary {
        revenue_gabinet: Money::from_cents(revenue_gabinet),
        ar_paid: Money::from_cents(ar_paid),
        ap_paid: Money::from_cents(ap_paid),
        leasing: Money::from_cents(leasing),
        salaries: Money::from_cents(salaries),
    })
}

/// Assembles the full dashboard for one month. `today` anchors the
/// due-soon box and the aging report; `due_horizon_days` is the user's
/// due-soon window (7 to 60 days on the screen).
pub async fn month_overview(
    db: &Database,
    session: &Session,
    month: YearMonth,
    today: NaiveDate,
    due_horizon_days: u64,
) -> Result<MonthOverview, ScreenError> {
    session.require_admin()?;

    let (first, last) = month.bounds();

    let summary = month_summary(db, month).await?;

    let shifts = db.shifts();
    let receivables = db.receivables();
    let payables = db.payables();
    let (daily_rows, ar_rows, ap_rows) = tokio::try_join!(
        shifts.daily_revenue(first, last),
        receivables.daily_paid(first, last),
        payables.daily_paid(first, last),
    )?;
    let daily = fill_daily(first, last, &daily_rows);
    let daily_ar_paid = fill_daily(first, last, &ar_rows);
    let daily_ap_paid = fill_daily(first, last, &ap_rows);

    let staff = crate::screens::employees::monthly_attribution(db, session, month).await?;

    let due_soon = crate::screens::payables::due_soon(db, today, due_horizon_days).await;

    let unpaid = db.receivables().outstanding().await?;
    let aging = AgingReport::build(today, &unpaid);

    let shop = shop::month(db, month).await;
    let farm = farm::month(db, month).await;

    Ok(MonthOverview {
        month,
        summary,
        daily,
        daily_ar_paid,
        daily_ap_paid,
        staff,
        due_soon,
        aging,
        shop,
        farm,
    })
}

/// The trailing twelve months, oldest first, for the trend chart.
pub async fn trend(
    db: &Database,
    session: &Session,
    today: NaiveDate,
) -> Result<Vec<TrendPoint>, ScreenError> {
    session.require_admin()?;

    let mut points = Vec::with_capacity(TREND_MONTHS);
    for month in trailing_months(today, TREND_MONTHS) {
        let summary = month_summary(db, month).await?;
        points.push(TrendPoint::new(month, summary));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::{employees, leases, payables, receivables, reception};
    use vetfin_core::{EmployeeRole, Shift};
    use vetfin_db::DbConfig;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn admin() -> Session {
        Session::login("admin", "Grubybob").unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    async fn seed_may(db: &Database, session: &Session) {
        // Roster: one vet, one technician.
        employees::hire(
            db,
            session,
            employees::EmployeeForm {
                name: "Anna Kowalska".to_string(),
                role: EmployeeRole::Veterinarian,
                monthly_salary_cents: 900_000,
            },
        )
        .await
        .unwrap();
        employees::hire(
            db,
            session,
            employees::EmployeeForm {
                name: "Marta Lis".to_string(),
                role: EmployeeRole::Technician,
                monthly_salary_cents: 500_000,
            },
        )
        .await
        .unwrap();

        // One May shift: 1500.00 zł takings.
        reception::submit_shift(
            db,
            reception::ShiftForm {
                report_date: d("2024-05-10"),
                shift: Shift::Morning,
                cash_cents: 100_000,
                terminal_cents: 50_000,
                veterinarian: "Anna Kowalska".to_string(),
                technicians: vec!["Marta Lis".to_string()],
                notes: None,
            },
        )
        .await
        .unwrap();

        // AR invoice collected in May: 800.00 zł.
        let ar = receivables::submit_invoice(
            db,
            receivables::ReceivableForm {
                issue_date: d("2024-04-20"),
                due_date: d("2024-05-04"),
                customer: "Gospodarstwo Kowalski".to_string(),
                number: None,
                category: None,
                amount_cents: 80_000,
                notes: None,
                paid: false,
                paid_date: None,
            },
        )
        .await
        .unwrap();
        receivables::settle(db, ar, d("2024-05-06")).await.unwrap();

        // AP invoice settled in May: 300.00 zł.
        let ap = payables::submit_invoice(
            db,
            payables::PayableForm {
                invoice_date: d("2024-05-02"),
                due_date: d("2024-05-16"),
                supplier: "VetSupply".to_string(),
                number: None,
                category: None,
                amount_cents: 30_000,
                notes: None,
            },
        )
        .await
        .unwrap();
        payables::settle(db, session, ap, d("2024-05-12")).await.unwrap();

        // Lease active through May: 1500.00 zł per month.
        leases::submit_lease(
            db,
            session,
            leases::LeaseForm {
                name: "X-ray unit".to_string(),
                monthly_amount_cents: 150_000,
                start_date: d("2024-01-01"),
                end_date: d("2025-12-31"),
                notes: None,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_month_net_formula() {
        let db = test_db().await;
        let session = admin();
        seed_may(&db, &session).await;

        let summary = month_summary(&db, YearMonth::new(2024, 5).unwrap())
            .await
            .unwrap();

        assert_eq!(summary.revenue_gabinet, Money::from_cents(150_000));
        assert_eq!(summary.ar_paid, Money::from_cents(80_000));
        assert_eq!(summary.ap_paid, Money::from_cents(30_000));
        assert_eq!(summary.leasing, Money::from_cents(150_000));
        assert_eq!(summary.salaries, Money::from_cents(1_400_000));

        // (1500 + 800) − (300 + 1500 + 14000) = −13500 zł
        assert_eq!(summary.net(), Money::from_cents(-1_350_000));
    }

    #[tokio::test]
    async fn test_overview_daily_series_is_zero_filled() {
        let db = test_db().await;
        let session = admin();
        seed_may(&db, &session).await;

        let overview = month_overview(
            &db,
            &session,
            YearMonth::new(2024, 5).unwrap(),
            d("2024-05-31"),
            payables::DEFAULT_DUE_SOON_DAYS,
        )
        .await
        .unwrap();

        assert_eq!(overview.daily.len(), 31);
        assert_eq!(overview.daily[9], (d("2024-05-10"), Money::from_cents(150_000)));
        assert_eq!(overview.daily[0], (d("2024-05-01"), Money::zero()));

        // Each zero-filled series sums back to its monthly ledger line.
        let sum = |series: &[(NaiveDate, Money)]| {
            series.iter().fold(Money::zero(), |acc, (_, m)| acc + *m)
        };
        assert_eq!(sum(&overview.daily), overview.summary.revenue_gabinet);
        assert_eq!(sum(&overview.daily_ar_paid), overview.summary.ar_paid);
        assert_eq!(sum(&overview.daily_ap_paid), overview.summary.ap_paid);

        // Collections land on the settlement day, not the issue day.
        assert_eq!(
            overview.daily_ar_paid[5],
            (d("2024-05-06"), Money::from_cents(80_000))
        );
        assert_eq!(
            overview.daily_ap_paid[11],
            (d("2024-05-12"), Money::from_cents(30_000))
        );

        // Both roster members attended the single shift and get its full
        // takings.
        assert_eq!(overview.staff.len(), 2);
        assert!(overview
            .staff
            .iter()
            .all(|s| s.attributed_revenue == Money::from_cents(150_000)));
    }

    #[tokio::test]
    async fn test_overview_requires_admin() {
        let db = test_db().await;
        let desk = Session::login("pracownik", "kubajestsuper").unwrap();

        let err = month_overview(
            &db,
            &desk,
            YearMonth::new(2024, 5).unwrap(),
            d("2024-05-31"),
            payables::DEFAULT_DUE_SOON_DAYS,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn test_trend_is_twelve_months_oldest_first() {
        let db = test_db().await;
        let session = admin();
        seed_may(&db, &session).await;

        let points = trend(&db, &session, d("2024-05-31")).await.unwrap();

        assert_eq!(points.len(), 12);
        assert_eq!(points[0].month, YearMonth::new(2023, 6).unwrap());
        assert_eq!(points[11].month, YearMonth::new(2024, 5).unwrap());

        // Salaries apply to every point, even months with no activity.
        assert_eq!(points[0].summary.salaries, Money::from_cents(1_400_000));
        assert_eq!(points[0].summary.revenue_gabinet, Money::zero());
    }
}
